use std::sync::Once;

use report_core::{
    update, AppState, Effect, Field, Headline, HeadlineResult, Msg, Phase, HEADLINES_PER_TYPE,
    HEADLINE_TYPES, MISSING_CREDENTIAL, REJECTED_CREDENTIAL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(report_logging::initialize_for_tests);
}

const FILLED: [(Field, &str); 10] = [
    (Field::NationalObjective, "A nation of inclusive growth"),
    (Field::StrategicInitiative, "Balanced regional development"),
    (Field::NationalTask, "Local job creation"),
    (Field::EvaluationCategory, "Core business"),
    (Field::EvaluationIndicator, "Customer satisfaction"),
    (Field::EvaluationDetailIndicator, ""),
    (Field::CoreActivity, "Youth hiring programme in rural districts"),
    (Field::InnovativeMeans, "Matching platform with local firms"),
    (Field::OrganizationalPerformance, "1,200 placements"),
    (Field::BeneficiaryPerformance, "Retention after a year at 81%"),
];

fn fill(mut state: AppState) -> AppState {
    for (field, value) in FILLED {
        let (next, _) = update(
            state,
            Msg::FieldChanged {
                field,
                value: value.to_string(),
            },
        );
        state = next;
    }
    state
}

fn ready_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::CredentialLoaded { present: true });
    fill(state)
}

fn full_batch() -> Vec<HeadlineResult> {
    HEADLINE_TYPES
        .iter()
        .map(|kind| {
            HeadlineResult::new(
                *kind,
                (1..=HEADLINES_PER_TYPE)
                    .map(|n| Headline::new(format!("{kind} #{n}"), format!("strategy {n}")))
                    .collect(),
            )
        })
        .collect()
}

fn submitted_request(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::GenerateHeadlines { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("generate effect")
}

#[test]
fn valid_submit_moves_to_loading_and_requests_headlines() {
    init_logging();
    let state = ready_state();

    let (mut next, effects) = update(state, Msg::Submitted);

    assert_eq!(next.phase(), Phase::Loading);
    assert!(next.consume_dirty());
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::GenerateHeadlines { input, .. } => {
            assert_eq!(input.national_task, "Local job creation");
            assert_eq!(input.evaluation_detail_indicator, "");
        }
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn full_generation_yields_forty_five_headlines() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::Submitted);
    let request_id = submitted_request(&effects);

    let (next, effects) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id,
            result: Ok(full_batch()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next.phase(), Phase::Results);
    let view = next.view();
    assert_eq!(view.results.len(), 15);
    assert_eq!(view.total_headlines, 45);
}

#[test]
fn first_batch_collapses_repeated_categories_and_titles() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::Submitted);
    let request_id = submitted_request(&effects);

    let batch = vec![
        HeadlineResult::new(
            "Question",
            vec![Headline::new("Same", "a"), Headline::new("Same", "b")],
        ),
        HeadlineResult::new("Benchmark", vec![Headline::new("Top", "c")]),
        HeadlineResult::new(
            "Question",
            vec![Headline::new("Same", "d"), Headline::new("Other", "e")],
        ),
    ];
    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id,
            result: Ok(batch),
        },
    );

    let results = state.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].kind, "Question");
    assert_eq!(
        results[0].headlines,
        vec![Headline::new("Same", "a"), Headline::new("Other", "e")]
    );
    assert_eq!(results[1].kind, "Benchmark");
    assert_eq!(state.view().total_headlines, 3);
}

#[test]
fn rejected_key_reopens_prompt_after_failed_generation() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::Submitted);
    let request_id = submitted_request(&effects);

    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id,
            result: Err("api key rejected: API key not valid".to_string()),
        },
    );
    let (state, effects) = update(state, Msg::CredentialRejected);

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Error);
    assert_eq!(state.error(), Some("api key rejected: API key not valid"));
    let view = state.view();
    assert!(!view.credential_present);
    assert!(view.credential_prompt_open);

    // Back on the form, a new submit is blocked until a key is entered.
    let (state, _) = update(state, Msg::ErrorAcknowledged);
    let (state, effects) = update(state, Msg::Submitted);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Intro);
    assert_eq!(state.error(), Some(MISSING_CREDENTIAL));
}

#[test]
fn rejected_key_without_pending_error_explains_itself() {
    let (state, _) = update(AppState::new(), Msg::CredentialLoaded { present: true });
    let (state, _) = update(state, Msg::CredentialRejected);
    assert_eq!(state.error(), Some(REJECTED_CREDENTIAL));
    assert!(state.view().credential_prompt_open);
}

#[test]
fn generation_failure_goes_to_error_then_back_to_input() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::Submitted);
    let request_id = submitted_request(&effects);

    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id,
            result: Err("network error: connection refused".to_string()),
        },
    );
    assert_eq!(state.phase(), Phase::Error);
    assert_eq!(state.error(), Some("network error: connection refused"));

    let (state, _) = update(state, Msg::ErrorAcknowledged);
    assert_eq!(state.phase(), Phase::Intro);
    assert_eq!(state.error(), None);
    // The form keeps what the user typed.
    assert_eq!(state.input().core_activity, FILLED[6].1);
}

#[test]
fn blank_required_field_blocks_submit_and_names_first_missing() {
    init_logging();
    let state = ready_state();
    let (state, _) = update(
        state,
        Msg::FieldChanged {
            field: Field::InnovativeMeans,
            value: "   ".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::FieldChanged {
            field: Field::BeneficiaryPerformance,
            value: String::new(),
        },
    );

    let (next, effects) = update(state, Msg::Submitted);

    assert!(effects.is_empty());
    assert_eq!(next.phase(), Phase::Intro);
    assert_eq!(
        next.error(),
        Some("'Innovative means' must be selected or filled in.")
    );
}

#[test]
fn missing_credential_opens_prompt_instead_of_calling_generator() {
    init_logging();
    let state = fill(AppState::new());

    let (next, effects) = update(state, Msg::Submitted);

    assert!(effects.is_empty());
    assert_eq!(next.phase(), Phase::Intro);
    assert_eq!(next.error(), Some(MISSING_CREDENTIAL));
    assert!(next.view().credential_prompt_open);

    let (next, effects) = update(next, Msg::CredentialSaved("  secret-key ".to_string()));
    assert_eq!(
        effects,
        vec![Effect::PersistCredential {
            key: "secret-key".to_string()
        }]
    );
    assert_eq!(next.error(), None);
    assert!(!next.view().credential_prompt_open);

    let (next, effects) = update(next, Msg::Submitted);
    assert_eq!(next.phase(), Phase::Loading);
    assert_eq!(effects.len(), 1);
}

#[test]
fn blank_credential_is_rejected() {
    let (state, effects) = update(AppState::new(), Msg::CredentialSaved("   ".to_string()));
    assert!(effects.is_empty());
    assert!(!state.view().credential_present);
    assert!(state.error().is_some());
}

#[test]
fn failed_credential_write_reopens_prompt() {
    let (state, _) = update(AppState::new(), Msg::CredentialSaved("key".to_string()));
    assert!(state.view().credential_present);

    let (state, effects) = update(
        state,
        Msg::CredentialPersistFailed("could not write credentials".to_string()),
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.credential_present);
    assert!(view.credential_prompt_open);
    assert_eq!(view.error.as_deref(), Some("could not write credentials"));
}

#[test]
fn second_submit_while_loading_is_ignored() {
    init_logging();
    let (state, first) = update(ready_state(), Msg::Submitted);
    let (state, second) = update(state, Msg::Submitted);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(state.phase(), Phase::Loading);
}

#[test]
fn result_arriving_after_reset_is_ignored() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::Submitted);
    let request_id = submitted_request(&effects);

    let (state, _) = update(state, Msg::ResetClicked);
    assert_eq!(state.phase(), Phase::Intro);
    assert_eq!(state.input().core_activity, "");

    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id,
            result: Ok(full_batch()),
        },
    );
    assert_eq!(state.phase(), Phase::Intro);
    assert!(state.results().is_empty());
}

#[test]
fn old_answer_does_not_satisfy_new_request() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::Submitted);
    let old_id = submitted_request(&effects);
    let (state, _) = update(state, Msg::ResetClicked);
    let state = fill(state);
    let (state, effects) = update(state, Msg::Submitted);
    let new_id = submitted_request(&effects);
    assert_ne!(old_id, new_id);

    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id: old_id,
            result: Ok(full_batch()),
        },
    );
    assert_eq!(state.phase(), Phase::Loading);

    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id: new_id,
            result: Ok(full_batch()),
        },
    );
    assert_eq!(state.phase(), Phase::Results);
}

#[test]
fn reset_clears_everything_but_credential() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::Submitted);
    let request_id = submitted_request(&effects);
    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id,
            result: Ok(full_batch()),
        },
    );
    let headline = state.results()[0].headlines[0].clone();
    let (state, _) = update(state, Msg::HeadlineSelected(headline));

    let (state, _) = update(state, Msg::ResetClicked);
    let view = state.view();

    assert_eq!(view.phase, Phase::Intro);
    assert!(view.results.is_empty());
    assert!(view.selected.is_none());
    assert!(view.draft.is_none());
    assert!(view.error.is_none());
    assert!(view.attachments.is_empty());
    assert!(view.fields.iter().all(|field| field.value.is_empty()));
    assert!(view.credential_present);
}

#[test]
fn selecting_unknown_headline_is_ignored() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::Submitted);
    let request_id = submitted_request(&effects);
    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id,
            result: Ok(full_batch()),
        },
    );

    let (state, _) = update(
        state,
        Msg::HeadlineSelected(Headline::new("Not generated", "n/a")),
    );
    assert!(state.view().selected.is_none());
}

#[test]
fn export_emits_effect_with_current_results() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::Submitted);
    let request_id = submitted_request(&effects);
    let (state, _) = update(
        state,
        Msg::HeadlinesGenerated {
            request_id,
            result: Ok(full_batch()),
        },
    );

    let (state, effects) = update(state, Msg::ExportRequested);
    assert_eq!(
        effects,
        vec![Effect::ExportResults {
            results: full_batch()
        }]
    );

    let (state, _) = update(
        state,
        Msg::ExportFinished(Ok("output/headline_results.txt".to_string())),
    );
    assert_eq!(
        state.view().notice.as_deref(),
        Some("Saved results to output/headline_results.txt")
    );
}

#[test]
fn export_without_results_does_nothing() {
    let (_state, effects) = update(ready_state(), Msg::ExportRequested);
    assert!(effects.is_empty());
}
