use std::fmt;

use report_logging::report_debug;

use crate::cascade::{detail_indicator_required, options_for};
use crate::view_model::{AppViewModel, DraftView, FieldView};
use crate::{total_headlines, DraftCache, Field, Headline, HeadlineResult, UserInput};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Intro,
    Loading,
    Results,
    Drafting,
    Draft,
    Error,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Intro => "input",
            Phase::Loading => "generating headlines",
            Phase::Results => "results",
            Phase::Drafting => "writing draft",
            Phase::Draft => "draft",
            Phase::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) phase: Phase,
    pub(crate) input: UserInput,
    pub(crate) results: Vec<HeadlineResult>,
    pub(crate) selected: Option<Headline>,
    pub(crate) drafts: DraftCache,
    pub(crate) error: Option<String>,
    pub(crate) notice: Option<String>,
    pub(crate) credential_present: bool,
    pub(crate) credential_prompt_open: bool,
    pub(crate) next_request_id: RequestId,
    pub(crate) generate_request: Option<RequestId>,
    pub(crate) more_request: Option<RequestId>,
    pub(crate) draft_request: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input(&self) -> &UserInput {
        &self.input
    }

    pub fn results(&self) -> &[HeadlineResult] {
        &self.results
    }

    pub fn drafts(&self) -> &DraftCache {
        &self.drafts
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let fields = Field::ALL
            .into_iter()
            .map(|field| FieldView {
                field,
                value: self.input.get(field).to_string(),
                options: options_for(field, &self.input)
                    .iter()
                    .map(|option| option.to_string())
                    .collect(),
                required: field != Field::EvaluationDetailIndicator
                    || detail_indicator_required(&self.input),
            })
            .collect();

        let draft = self.drafts.current_text().map(|text| DraftView {
            style: self.drafts.current(),
            text: text.to_string(),
            cached: self.drafts.cached_styles(),
            pending: self.drafts.pending_styles(),
        });

        AppViewModel {
            phase: self.phase,
            fields,
            attachments: self
                .input
                .attachments
                .iter()
                .map(|attachment| attachment.name.clone())
                .collect(),
            results: self.results.clone(),
            total_headlines: total_headlines(&self.results),
            selected: self.selected.clone(),
            draft,
            error: self.error.clone(),
            notice: self.notice.clone(),
            regenerating: self.more_request.is_some(),
            busy: self.is_busy(),
            credential_present: self.credential_present,
            credential_prompt_open: self.credential_prompt_open,
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Drafting)
            || self.more_request.is_some()
            || !self.drafts.pending_styles().is_empty()
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            report_debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.notice = None;
        self.mark_dirty();
    }

    /// Back to an empty form. Credential state and the request counter
    /// survive so answers to earlier requests can never match again.
    pub(crate) fn reset(&mut self) {
        let fresh = AppState {
            credential_present: self.credential_present,
            credential_prompt_open: self.credential_prompt_open,
            next_request_id: self.next_request_id,
            ..AppState::default()
        };
        *self = fresh;
        self.enter(Phase::Intro);
    }
}
