//! Report core: pure workflow state machine, result merging, draft style
//! cache and view-model helpers for the headline strategist.
mod cascade;
mod catalog;
mod drafts;
mod effect;
mod headline;
mod input;
mod merge;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use cascade::{apply_field_change, descendants, detail_indicator_required, options_for};
pub use catalog::{
    expected_headline_count, is_headline_type, DraftStyle, EVALUATION_CATEGORIES,
    HEADLINES_PER_TYPE, HEADLINE_TYPES, NATIONAL_OBJECTIVES,
};
pub use drafts::{DraftCache, PendingKind, StyleSwitch};
pub use effect::Effect;
pub use headline::{total_headlines, Headline, HeadlineResult};
pub use input::{Attachment, Field, UserInput};
pub use merge::merge_results;
pub use msg::Msg;
pub use state::{AppState, Phase, RequestId};
pub use update::{
    update, EMPTY_CREDENTIAL, EMPTY_FEEDBACK, MISSING_CREDENTIAL, NO_HEADLINE_SELECTED,
    REJECTED_CREDENTIAL,
};
pub use validate::{validate_input, ValidationError};
pub use view_model::{AppViewModel, DraftView, FieldView};
