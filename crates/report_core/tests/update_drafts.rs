use std::sync::Once;

use report_core::{
    update, AppState, DraftStyle, Effect, Field, Headline, HeadlineResult, Msg, Phase,
    NO_HEADLINE_SELECTED,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(report_logging::initialize_for_tests);
}

fn headline() -> Headline {
    Headline::new("Jobs that stay: 81% of youth hires remain", "retention evidence")
}

fn results_state() -> AppState {
    let (mut state, _) = update(AppState::new(), Msg::CredentialLoaded { present: true });
    for field in Field::ALL {
        let value = match field {
            Field::NationalObjective => "A nation of inclusive growth",
            Field::StrategicInitiative => "Support for vulnerable groups",
            Field::NationalTask => "Care service coverage",
            Field::EvaluationCategory => "Management",
            Field::EvaluationIndicator => "Social value",
            Field::EvaluationDetailIndicator => "Job creation",
            _ => "filled",
        };
        let (next, _) = update(
            state,
            Msg::FieldChanged {
                field,
                value: value.to_string(),
            },
        );
        state = next;
    }
    let (state, effects) = update(state, Msg::Submitted);
    let Some(Effect::GenerateHeadlines { request_id, .. }) = effects.first() else {
        panic!("expected generate effect, got {effects:?}");
    };
    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id: *request_id,
            result: Ok(vec![HeadlineResult::new(
                "Numbers-driven",
                vec![headline(), Headline::new("Other", "other")],
            )]),
        },
    );
    state
}

fn draft_state() -> AppState {
    let (state, _) = update(results_state(), Msg::HeadlineSelected(headline()));
    let (state, effects) = update(state, Msg::WriteDraftClicked);
    assert_eq!(state.phase(), Phase::Drafting);
    let Some(Effect::WriteDraft {
        request_id,
        headline: requested,
        ..
    }) = effects.first()
    else {
        panic!("expected draft effect, got {effects:?}");
    };
    assert_eq!(requested, &headline());
    let (state, _) = update(
        state,
        Msg::DraftWritten {
            request_id: *request_id,
            result: Ok("Base draft text.".to_string()),
        },
    );
    assert_eq!(state.phase(), Phase::Draft);
    state
}

fn restyle(state: AppState, style: DraftStyle) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::DraftStyleSelected(style));
    match &effects[..] {
        [Effect::RestyleDraft {
            request_id,
            style: requested,
            base,
        }] => {
            assert_eq!(*requested, style);
            assert_eq!(base, "Base draft text.");
            (state, *request_id)
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn write_draft_requires_selection() {
    init_logging();
    let (state, effects) = update(results_state(), Msg::WriteDraftClicked);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Results);
    assert_eq!(state.error(), Some(NO_HEADLINE_SELECTED));
}

#[test]
fn first_draft_is_stored_as_base_style() {
    init_logging();
    let view = draft_state().view();
    let draft = view.draft.expect("draft view");
    assert_eq!(draft.style, DraftStyle::Standard);
    assert_eq!(draft.text, "Base draft text.");
    assert_eq!(draft.cached, vec![DraftStyle::Standard]);
    assert!(draft.pending.is_empty());
}

#[test]
fn draft_failure_returns_to_results() {
    init_logging();
    let (state, _) = update(results_state(), Msg::HeadlineSelected(headline()));
    let (state, effects) = update(state, Msg::WriteDraftClicked);
    let Some(Effect::WriteDraft { request_id, .. }) = effects.first() else {
        panic!("expected draft effect");
    };

    let (state, _) = update(
        state,
        Msg::DraftWritten {
            request_id: *request_id,
            result: Err("timeout".to_string()),
        },
    );

    assert_eq!(state.phase(), Phase::Results);
    assert_eq!(state.error(), Some("timeout"));
    assert_eq!(state.view().selected, Some(headline()));
}

#[test]
fn uncached_style_is_pending_while_base_stays_visible() {
    init_logging();
    let (state, _request_id) = restyle(draft_state(), DraftStyle::Storytelling);

    let view = state.view();
    let draft = view.draft.expect("draft view");
    assert_eq!(draft.style, DraftStyle::Storytelling);
    assert_eq!(draft.pending, vec![DraftStyle::Storytelling]);
    assert_eq!(draft.text, "Base draft text.");
    assert!(view.busy);
    assert_eq!(view.phase, Phase::Draft);
}

#[test]
fn cached_style_switch_makes_no_remote_call() {
    init_logging();
    let (state, request_id) = restyle(draft_state(), DraftStyle::BulletSummary);
    let (state, _) = update(
        state,
        Msg::DraftStyleWritten {
            request_id,
            style: DraftStyle::BulletSummary,
            result: Ok("- point".to_string()),
        },
    );

    let (state, effects) = update(state, Msg::DraftStyleSelected(DraftStyle::Standard));
    assert!(effects.is_empty());
    assert_eq!(state.view().draft.unwrap().text, "Base draft text.");

    let (state, effects) = update(state, Msg::DraftStyleSelected(DraftStyle::BulletSummary));
    assert!(effects.is_empty());
    assert_eq!(state.view().draft.unwrap().text, "- point");
}

#[test]
fn switching_back_to_base_leaves_base_untouched() {
    init_logging();
    let (state, request_id) = restyle(draft_state(), DraftStyle::ImpactFirst);
    let (state, effects) = update(state, Msg::DraftStyleSelected(DraftStyle::Standard));
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::DraftStyleWritten {
            request_id,
            style: DraftStyle::ImpactFirst,
            result: Ok("Impact text".to_string()),
        },
    );

    let drafts = state.drafts();
    assert_eq!(drafts.current(), DraftStyle::Standard);
    assert_eq!(drafts.text(DraftStyle::Standard), Some("Base draft text."));
    assert_eq!(drafts.text(DraftStyle::ImpactFirst), Some("Impact text"));
}

#[test]
fn failed_restyle_reverts_to_base_and_reports() {
    init_logging();
    let (state, request_id) = restyle(draft_state(), DraftStyle::Storytelling);

    let (state, _) = update(
        state,
        Msg::DraftStyleWritten {
            request_id,
            style: DraftStyle::Storytelling,
            result: Err("network error".to_string()),
        },
    );

    let drafts = state.drafts();
    assert_eq!(drafts.current(), DraftStyle::Standard);
    assert_eq!(drafts.text(DraftStyle::Standard), Some("Base draft text."));
    assert!(!drafts.is_cached(DraftStyle::Storytelling));
    assert!(!drafts.is_pending(DraftStyle::Storytelling));
    assert_eq!(state.error(), Some("network error"));
    assert_eq!(state.phase(), Phase::Draft);
}

#[test]
fn pending_style_is_not_requested_twice() {
    init_logging();
    let (state, _request_id) = restyle(draft_state(), DraftStyle::Storytelling);
    let (state, _) = update(state, Msg::DraftStyleSelected(DraftStyle::Standard));

    let (state, effects) = update(state, Msg::DraftStyleSelected(DraftStyle::Storytelling));

    assert!(effects.is_empty());
    assert_eq!(state.drafts().current(), DraftStyle::Storytelling);
}

#[test]
fn feedback_rewrites_only_the_current_style() {
    init_logging();
    let (state, request_id) = restyle(draft_state(), DraftStyle::BulletSummary);
    let (state, _) = update(
        state,
        Msg::DraftStyleWritten {
            request_id,
            style: DraftStyle::BulletSummary,
            result: Ok("- point".to_string()),
        },
    );

    let (state, effects) = update(
        state,
        Msg::DraftFeedbackSubmitted("  add the budget figure ".to_string()),
    );
    let revision_id = match &effects[..] {
        [Effect::ReviseDraft {
            request_id,
            style,
            previous,
            feedback,
        }] => {
            assert_eq!(*style, DraftStyle::BulletSummary);
            assert_eq!(previous, "- point");
            assert_eq!(feedback, "add the budget figure");
            *request_id
        }
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, _) = update(
        state,
        Msg::DraftStyleWritten {
            request_id: revision_id,
            style: DraftStyle::BulletSummary,
            result: Ok("- point\n- budget 3.2bn".to_string()),
        },
    );

    let drafts = state.drafts();
    assert_eq!(
        drafts.text(DraftStyle::BulletSummary),
        Some("- point\n- budget 3.2bn")
    );
    assert_eq!(drafts.text(DraftStyle::Standard), Some("Base draft text."));
    assert_eq!(drafts.current(), DraftStyle::BulletSummary);
}

#[test]
fn failed_feedback_keeps_previous_text() {
    init_logging();
    let (state, effects) = update(
        draft_state(),
        Msg::DraftFeedbackSubmitted("shorter".to_string()),
    );
    let Some(Effect::ReviseDraft { request_id, .. }) = effects.first() else {
        panic!("expected revise effect");
    };

    let (state, _) = update(
        state,
        Msg::DraftStyleWritten {
            request_id: *request_id,
            style: DraftStyle::Standard,
            result: Err("http status 500".to_string()),
        },
    );

    assert_eq!(state.drafts().text(DraftStyle::Standard), Some("Base draft text."));
    assert_eq!(state.drafts().current(), DraftStyle::Standard);
    assert_eq!(state.error(), Some("http status 500"));
}

#[test]
fn blank_feedback_is_rejected() {
    init_logging();
    let (state, effects) = update(draft_state(), Msg::DraftFeedbackSubmitted("  ".to_string()));
    assert!(effects.is_empty());
    assert!(state.error().is_some());
}

#[test]
fn back_to_results_drops_drafts_and_late_answers() {
    init_logging();
    let (state, request_id) = restyle(draft_state(), DraftStyle::Storytelling);
    let (state, _) = update(state, Msg::BackToResults);

    assert_eq!(state.phase(), Phase::Results);
    assert!(state.drafts().is_empty());
    assert_eq!(state.view().selected, Some(headline()));

    let (state, _) = update(
        state,
        Msg::DraftStyleWritten {
            request_id,
            style: DraftStyle::Storytelling,
            result: Ok("late".to_string()),
        },
    );
    assert!(state.drafts().is_empty());
}

#[test]
fn new_selection_clears_draft_cache() {
    init_logging();
    let (state, _) = update(draft_state(), Msg::BackToResults);
    let (state, _) = update(state, Msg::HeadlineSelected(Headline::new("Other", "other")));
    assert!(state.drafts().is_empty());
    assert_eq!(state.view().selected, Some(Headline::new("Other", "other")));
}
