//! Static tables: headline categories, draft styles and the cascade lookups
//! behind the selection fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Headlines requested per category in one generation call.
pub const HEADLINES_PER_TYPE: usize = 3;

/// The fixed set of headline categories. Every generated `HeadlineResult`
/// carries one of these labels as its `type`.
pub const HEADLINE_TYPES: [&str; 15] = [
    "Outcome-focused",
    "Problem-solution",
    "Numbers-driven",
    "Customer-centric",
    "Innovation highlight",
    "Question",
    "Metaphor",
    "Before-and-after",
    "Policy alignment",
    "Collaboration",
    "Future vision",
    "Declarative",
    "Storytelling",
    "Value creation",
    "Benchmark",
];

pub fn is_headline_type(label: &str) -> bool {
    HEADLINE_TYPES.contains(&label)
}

/// Total headlines a full generation call is expected to return.
pub const fn expected_headline_count() -> usize {
    HEADLINE_TYPES.len() * HEADLINES_PER_TYPE
}

/// Writing style of a draft. `Standard` is the base style every other style
/// is derived from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum DraftStyle {
    #[default]
    Standard,
    BulletSummary,
    Storytelling,
    ImpactFirst,
}

impl DraftStyle {
    pub const ALL: [DraftStyle; 4] = [
        DraftStyle::Standard,
        DraftStyle::BulletSummary,
        DraftStyle::Storytelling,
        DraftStyle::ImpactFirst,
    ];

    pub const BASE: DraftStyle = DraftStyle::Standard;

    pub fn id(self) -> &'static str {
        match self {
            DraftStyle::Standard => "standard",
            DraftStyle::BulletSummary => "bullet-summary",
            DraftStyle::Storytelling => "storytelling",
            DraftStyle::ImpactFirst => "impact-first",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.id() == id)
    }

    /// Instruction handed to the generator when rewriting a draft in this style.
    pub fn instruction(self) -> &'static str {
        match self {
            DraftStyle::Standard => {
                "Write in a formal report register with an introduction, body and conclusion."
            }
            DraftStyle::BulletSummary => {
                "Condense the draft into concise bullet points grouped under short headings, \
                 keeping every figure and outcome."
            }
            DraftStyle::Storytelling => {
                "Retell the draft as a narrative that follows the beneficiaries from the \
                 original problem to the achieved change."
            }
            DraftStyle::ImpactFirst => {
                "Open with the most significant quantitative outcome, then explain the \
                 activities and means that produced it."
            }
        }
    }
}

impl fmt::Display for DraftStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

type Lookup = &'static [(&'static str, &'static [&'static str])];

pub const NATIONAL_OBJECTIVES: &[&str] = &[
    "A nation of inclusive growth",
    "A safe and sustainable society",
    "A trusted and innovative public sector",
];

pub(crate) const INITIATIVES_BY_OBJECTIVE: Lookup = &[
    (
        "A nation of inclusive growth",
        &["Balanced regional development", "Support for vulnerable groups"],
    ),
    (
        "A safe and sustainable society",
        &["Carbon neutrality transition", "Disaster and safety management"],
    ),
    (
        "A trusted and innovative public sector",
        &["Digital platform government", "Public service efficiency"],
    ),
];

pub(crate) const TASKS_BY_INITIATIVE: Lookup = &[
    (
        "Balanced regional development",
        &[
            "Regional innovation hubs",
            "Local job creation",
            "Rural infrastructure renewal",
        ],
    ),
    (
        "Support for vulnerable groups",
        &["Housing welfare expansion", "Care service coverage"],
    ),
    (
        "Carbon neutrality transition",
        &["Renewable energy expansion", "Energy efficiency retrofits"],
    ),
    (
        "Disaster and safety management",
        &["Facility safety inspections", "Early warning systems"],
    ),
    (
        "Digital platform government",
        &["Open public data", "AI-assisted public services"],
    ),
    (
        "Public service efficiency",
        &["Process redesign", "Budget execution reform"],
    ),
];

pub const EVALUATION_CATEGORIES: &[&str] = &["Management", "Core business"];

pub(crate) const INDICATORS_BY_CATEGORY: Lookup = &[
    (
        "Management",
        &[
            "Strategy and leadership",
            "Social value",
            "Business efficiency",
            "Organization and people",
        ],
    ),
    (
        "Core business",
        &["Core business performance", "Customer satisfaction"],
    ),
];

/// Indicators missing from this table have no further breakdown.
pub(crate) const DETAILS_BY_INDICATOR: Lookup = &[
    (
        "Social value",
        &[
            "Job creation",
            "Equal opportunity",
            "Safety and environment",
            "Shared growth",
            "Ethical management",
        ],
    ),
    (
        "Business efficiency",
        &["Labor productivity", "Capital productivity"],
    ),
    (
        "Organization and people",
        &["Organizational culture", "Workforce development"],
    ),
];

pub(crate) fn lookup(table: Lookup, parent: &str) -> &'static [&'static str] {
    if parent.is_empty() {
        return &[];
    }
    table
        .iter()
        .find(|(key, _)| *key == parent)
        .map(|(_, children)| *children)
        .unwrap_or(&[])
}
