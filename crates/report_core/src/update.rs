use report_logging::{report_debug, report_info};

use crate::cascade::apply_field_change;
use crate::drafts::{PendingKind, StyleSwitch};
use crate::headline::contains_headline;
use crate::{
    merge_results, validate_input, AppState, DraftStyle, Effect, HeadlineResult, Msg, Phase,
    RequestId,
};

pub const MISSING_CREDENTIAL: &str =
    "The Google AI API key is not set. Enter it in the settings first.";
pub const REJECTED_CREDENTIAL: &str =
    "The Google AI API key was rejected. Enter a valid key in the settings.";
pub const EMPTY_CREDENTIAL: &str = "The API key must not be empty.";
pub const NO_HEADLINE_SELECTED: &str = "Select a headline to expand into a draft first.";
pub const EMPTY_FEEDBACK: &str = "Enter revision notes for the draft first.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { field, value } => {
            if state.phase == Phase::Intro && apply_field_change(&mut state.input, field, value) {
                state.drafts.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AttachmentAdded(attachment) => {
            if state.phase == Phase::Intro {
                state.input.attachments.push(attachment);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AttachmentRemoved(index) => {
            if state.phase == Phase::Intro && index < state.input.attachments.len() {
                state.input.attachments.remove(index);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AttachmentFailed(message) => {
            state.set_error(message);
            Vec::new()
        }
        Msg::Submitted => submit(&mut state),
        Msg::HeadlinesGenerated { request_id, result } => {
            headlines_generated(&mut state, request_id, result);
            Vec::new()
        }
        Msg::ErrorAcknowledged => {
            if state.phase == Phase::Error {
                state.error = None;
                state.enter(Phase::Intro);
            }
            Vec::new()
        }
        Msg::MoreHeadlinesRequested => request_more(&mut state),
        Msg::MoreHeadlinesGenerated { request_id, result } => {
            more_generated(&mut state, request_id, result);
            Vec::new()
        }
        Msg::HeadlineSelected(headline) => {
            if state.phase == Phase::Results
                && state.selected.as_ref() != Some(&headline)
                && contains_headline(&state.results, &headline)
            {
                state.selected = Some(headline);
                state.drafts.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::WriteDraftClicked => write_draft(&mut state),
        Msg::DraftWritten { request_id, result } => {
            draft_written(&mut state, request_id, result);
            Vec::new()
        }
        Msg::DraftStyleSelected(style) => select_style(&mut state, style),
        Msg::DraftFeedbackSubmitted(feedback) => submit_feedback(&mut state, feedback),
        Msg::DraftStyleWritten {
            request_id,
            style,
            result,
        } => {
            draft_style_written(&mut state, request_id, style, result);
            Vec::new()
        }
        Msg::BackToResults => {
            if state.phase == Phase::Draft {
                state.drafts.clear();
                state.enter(Phase::Results);
            }
            Vec::new()
        }
        Msg::ExportRequested => {
            if matches!(state.phase, Phase::Results | Phase::Draft) && !state.results.is_empty() {
                vec![Effect::ExportResults {
                    results: state.results.clone(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ExportFinished(outcome) => {
            match outcome {
                Ok(path) => {
                    state.notice = Some(format!("Saved results to {path}"));
                    state.mark_dirty();
                }
                Err(message) => state.set_error(message),
            }
            Vec::new()
        }
        Msg::ErrorDismissed => {
            if state.error.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            report_info!("Workflow reset");
            state.reset();
            Vec::new()
        }
        Msg::CredentialLoaded { present } => {
            state.credential_present = present;
            state.credential_prompt_open = !present;
            state.mark_dirty();
            Vec::new()
        }
        Msg::CredentialSaved(key) => save_credential(&mut state, key),
        Msg::CredentialPersistFailed(message) => {
            state.credential_present = false;
            state.credential_prompt_open = true;
            state.set_error(message);
            Vec::new()
        }
        Msg::CredentialRejected => {
            state.credential_present = false;
            state.credential_prompt_open = true;
            if state.error.is_none() {
                state.set_error(REJECTED_CREDENTIAL);
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::CredentialPromptOpened => {
            state.credential_prompt_open = true;
            state.mark_dirty();
            Vec::new()
        }
        Msg::CredentialPromptDismissed => {
            state.credential_prompt_open = false;
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Remote actions are blocked outright without a key; the prompt opens instead.
fn require_credential(state: &mut AppState) -> bool {
    if state.credential_present {
        return true;
    }
    state.set_error(MISSING_CREDENTIAL);
    state.credential_prompt_open = true;
    false
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.phase != Phase::Intro || !require_credential(state) {
        return Vec::new();
    }
    if let Err(err) = validate_input(&state.input) {
        state.set_error(err.to_string());
        return Vec::new();
    }

    let request_id = state.allocate_request_id();
    state.generate_request = Some(request_id);
    state.error = None;
    state.notice = None;
    state.enter(Phase::Loading);
    vec![Effect::GenerateHeadlines {
        request_id,
        input: state.input.clone(),
    }]
}

fn headlines_generated(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<Vec<HeadlineResult>, String>,
) {
    if state.phase != Phase::Loading || state.generate_request != Some(request_id) {
        report_debug!("Dropping stale headline result {}", request_id);
        return;
    }
    state.generate_request = None;
    match result {
        Ok(results) => {
            state.results = merge_results(&[], results);
            state.selected = None;
            state.drafts.clear();
            state.enter(Phase::Results);
        }
        Err(message) => {
            state.set_error(message);
            state.enter(Phase::Error);
        }
    }
}

fn request_more(state: &mut AppState) -> Vec<Effect> {
    if state.phase != Phase::Results || state.more_request.is_some() {
        return Vec::new();
    }
    if !require_credential(state) {
        return Vec::new();
    }

    let request_id = state.allocate_request_id();
    state.more_request = Some(request_id);
    state.error = None;
    state.mark_dirty();
    vec![Effect::GenerateMoreHeadlines {
        request_id,
        input: state.input.clone(),
        existing: state.results.clone(),
    }]
}

fn more_generated(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<Vec<HeadlineResult>, String>,
) {
    let consuming_phase = matches!(state.phase, Phase::Results | Phase::Drafting | Phase::Draft);
    if !consuming_phase || state.more_request != Some(request_id) {
        report_debug!("Dropping stale headline refill {}", request_id);
        return;
    }
    state.more_request = None;
    match result {
        Ok(batch) => {
            state.results = merge_results(&state.results, batch);
            state.mark_dirty();
        }
        Err(message) => state.set_error(message),
    }
}

fn write_draft(state: &mut AppState) -> Vec<Effect> {
    if state.phase != Phase::Results {
        return Vec::new();
    }
    let Some(headline) = state.selected.clone() else {
        state.set_error(NO_HEADLINE_SELECTED);
        return Vec::new();
    };
    if !require_credential(state) {
        return Vec::new();
    }

    let request_id = state.allocate_request_id();
    state.draft_request = Some(request_id);
    state.drafts.clear();
    state.error = None;
    state.enter(Phase::Drafting);
    vec![Effect::WriteDraft {
        request_id,
        input: state.input.clone(),
        headline,
    }]
}

fn draft_written(state: &mut AppState, request_id: RequestId, result: Result<String, String>) {
    if state.phase != Phase::Drafting || state.draft_request != Some(request_id) {
        report_debug!("Dropping stale draft {}", request_id);
        return;
    }
    state.draft_request = None;
    match result {
        Ok(text) => {
            state.drafts.start(text);
            state.enter(Phase::Draft);
        }
        Err(message) => {
            state.set_error(message);
            state.enter(Phase::Results);
        }
    }
}

fn select_style(state: &mut AppState, style: DraftStyle) -> Vec<Effect> {
    if state.phase != Phase::Draft {
        return Vec::new();
    }
    match state.drafts.switch_to(style) {
        StyleSwitch::NoBase | StyleSwitch::Unchanged => Vec::new(),
        StyleSwitch::Cached | StyleSwitch::AlreadyPending => {
            state.mark_dirty();
            Vec::new()
        }
        StyleSwitch::Generate { base } => {
            if !require_credential(state) {
                return Vec::new();
            }
            let request_id = state.allocate_request_id();
            state.drafts.begin(style, request_id, PendingKind::Restyle);
            state.error = None;
            state.mark_dirty();
            vec![Effect::RestyleDraft {
                request_id,
                style,
                base,
            }]
        }
    }
}

fn submit_feedback(state: &mut AppState, feedback: String) -> Vec<Effect> {
    if state.phase != Phase::Draft {
        return Vec::new();
    }
    let feedback = feedback.trim().to_string();
    if feedback.is_empty() {
        state.set_error(EMPTY_FEEDBACK);
        return Vec::new();
    }
    let style = state.drafts.current();
    if state.drafts.is_pending(style) {
        return Vec::new();
    }
    let Some(previous) = state.drafts.text(style).map(str::to_owned) else {
        return Vec::new();
    };
    if !require_credential(state) {
        return Vec::new();
    }

    let request_id = state.allocate_request_id();
    state.drafts.begin(style, request_id, PendingKind::Revision);
    state.error = None;
    state.mark_dirty();
    vec![Effect::ReviseDraft {
        request_id,
        style,
        previous,
        feedback,
    }]
}

fn draft_style_written(
    state: &mut AppState,
    request_id: RequestId,
    style: DraftStyle,
    result: Result<String, String>,
) {
    if state.phase != Phase::Draft {
        report_debug!("Dropping draft style {} result {}", style, request_id);
        return;
    }
    match result {
        Ok(text) => {
            if state.drafts.complete(style, request_id, text) {
                state.mark_dirty();
            } else {
                report_debug!("Dropping stale draft style {} result {}", style, request_id);
            }
        }
        Err(message) => {
            if state.drafts.fail(style, request_id).is_some() {
                state.set_error(message);
            }
        }
    }
}

fn save_credential(state: &mut AppState, key: String) -> Vec<Effect> {
    let key = key.trim().to_string();
    if key.is_empty() {
        state.set_error(EMPTY_CREDENTIAL);
        return Vec::new();
    }
    state.credential_present = true;
    state.credential_prompt_open = false;
    if state.error.as_deref() == Some(MISSING_CREDENTIAL) {
        state.error = None;
    }
    state.mark_dirty();
    vec![Effect::PersistCredential { key }]
}
