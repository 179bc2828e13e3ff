use std::sync::Arc;
use std::time::Duration;

use report_core::{DraftStyle, Headline, HeadlineResult, UserInput};
use report_engine::{
    EngineCommand, EngineEvent, EngineHandle, FailureKind, GenerateError, Generator,
};

struct FakeGenerator;

#[async_trait::async_trait]
impl Generator for FakeGenerator {
    async fn generate_headlines(
        &self,
        input: &UserInput,
    ) -> Result<Vec<HeadlineResult>, GenerateError> {
        Ok(vec![HeadlineResult::new(
            "Question",
            vec![Headline::new(format!("About {}?", input.core_activity), "s")],
        )])
    }

    async fn more_headlines(
        &self,
        _input: &UserInput,
        existing: &[HeadlineResult],
    ) -> Result<Vec<HeadlineResult>, GenerateError> {
        Ok(existing.to_vec())
    }

    async fn write_draft(
        &self,
        _input: &UserInput,
        headline: &Headline,
    ) -> Result<String, GenerateError> {
        Ok(format!("Draft for {}", headline.title))
    }

    async fn regenerate_draft(
        &self,
        _previous: &str,
        _feedback: &str,
    ) -> Result<String, GenerateError> {
        Err(GenerateError::new(FailureKind::Network, "offline"))
    }

    async fn change_draft_style(
        &self,
        base: &str,
        style: DraftStyle,
    ) -> Result<String, GenerateError> {
        Ok(format!("{} / {}", style.id(), base))
    }
}

fn handle() -> EngineHandle {
    EngineHandle::new(Arc::new(FakeGenerator))
}

fn wait(handle: &EngineHandle) -> EngineEvent {
    handle
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn headline_command_round_trips_through_worker() {
    let handle = handle();
    handle.submit(EngineCommand::GenerateHeadlines {
        request_id: 7,
        input: UserInput {
            core_activity: "training".into(),
            ..UserInput::default()
        },
    });

    match wait(&handle) {
        EngineEvent::HeadlinesGenerated { request_id, result } => {
            assert_eq!(request_id, 7);
            let results = result.unwrap();
            assert_eq!(results[0].headlines[0].title, "About training?");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn draft_commands_carry_style_and_errors() {
    let handle = handle();
    handle.submit(EngineCommand::RestyleDraft {
        request_id: 1,
        style: DraftStyle::Storytelling,
        base: "base".into(),
    });
    match wait(&handle) {
        EngineEvent::DraftStyleWritten {
            request_id,
            style,
            result,
        } => {
            assert_eq!(request_id, 1);
            assert_eq!(style, DraftStyle::Storytelling);
            assert_eq!(result.unwrap(), "storytelling / base");
        }
        other => panic!("unexpected event {other:?}"),
    }

    handle.submit(EngineCommand::ReviseDraft {
        request_id: 2,
        style: DraftStyle::Standard,
        previous: "old".into(),
        feedback: "notes".into(),
    });
    match wait(&handle) {
        EngineEvent::DraftStyleWritten {
            request_id, result, ..
        } => {
            assert_eq!(request_id, 2);
            assert_eq!(result.unwrap_err().kind, FailureKind::Network);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn write_draft_reports_request_id() {
    let handle = handle();
    handle.submit(EngineCommand::WriteDraft {
        request_id: 3,
        input: UserInput::default(),
        headline: Headline::new("Jobs first", "s"),
    });
    assert_eq!(
        wait(&handle),
        EngineEvent::DraftWritten {
            request_id: 3,
            result: Ok("Draft for Jobs first".to_string()),
        }
    );
    assert!(handle.try_recv().is_none());
}
