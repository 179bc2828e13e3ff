use crate::{DraftStyle, Field, Headline, HeadlineResult, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub fields: Vec<FieldView>,
    pub attachments: Vec<String>,
    pub results: Vec<HeadlineResult>,
    pub total_headlines: usize,
    pub selected: Option<Headline>,
    pub draft: Option<DraftView>,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// A "more headlines" request is in flight.
    pub regenerating: bool,
    /// Any remote request is in flight.
    pub busy: bool,
    pub credential_present: bool,
    pub credential_prompt_open: bool,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn field(&self, field: Field) -> Option<&FieldView> {
        self.fields.iter().find(|view| view.field == field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub value: String,
    /// Empty for free-text fields and for children of an unset parent.
    pub options: Vec<String>,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftView {
    pub style: DraftStyle,
    pub text: String,
    pub cached: Vec<DraftStyle>,
    pub pending: Vec<DraftStyle>,
}
