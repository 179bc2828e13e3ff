use serde::{Deserialize, Serialize};

/// A generated candidate report title with the rationale behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub strategy: String,
}

impl Headline {
    pub fn new(title: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            strategy: strategy.into(),
        }
    }
}

/// One category's generated candidates. `kind` is serialized as `type` to
/// match the generator's response schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub headlines: Vec<Headline>,
}

impl HeadlineResult {
    pub fn new(kind: impl Into<String>, headlines: Vec<Headline>) -> Self {
        Self {
            kind: kind.into(),
            headlines,
        }
    }
}

/// Number of headlines across every category.
pub fn total_headlines(results: &[HeadlineResult]) -> usize {
    results.iter().map(|result| result.headlines.len()).sum()
}

pub(crate) fn contains_headline(results: &[HeadlineResult], headline: &Headline) -> bool {
    results
        .iter()
        .any(|result| result.headlines.iter().any(|h| h == headline))
}
