use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use report_core::{Effect, Msg, RequestId};
use report_engine::{
    export_results, load_attachment, CredentialStore, EngineCommand, EngineEvent, EngineHandle,
    FailureKind, GenerateError, Generator,
};
use report_logging::{report_error, report_info, report_warn};

const EVENT_POLL: Duration = Duration::from_millis(100);

/// Executes core effects: remote calls go to the engine, file work runs
/// inline and reports back as a message.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    credentials: Arc<dyn CredentialStore>,
    output_dir: PathBuf,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        generator: Arc<dyn Generator>,
        credentials: Arc<dyn CredentialStore>,
        output_dir: PathBuf,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let runner = Self {
            engine: Arc::new(EngineHandle::new(generator)),
            credentials,
            output_dir,
            msg_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ExportResults { results } => {
                    let outcome = match export_results(&self.output_dir, &results) {
                        Ok(summary) => {
                            report_info!(
                                "Exported {} headlines in {} categories to {:?}",
                                summary.headline_count,
                                summary.category_count,
                                summary.output_path
                            );
                            Ok(summary.output_path.display().to_string())
                        }
                        Err(err) => {
                            report_error!("Export to {:?} failed: {}", self.output_dir, err);
                            Err(format!("Could not save the results: {err}"))
                        }
                    };
                    let _ = self.msg_tx.send(Msg::ExportFinished(outcome));
                }
                Effect::PersistCredential { key } => {
                    if let Err(err) = self.credentials.save(&key) {
                        report_error!("Storing the API key failed: {}", err);
                        let _ = self.msg_tx.send(Msg::CredentialPersistFailed(format!(
                            "Could not store the API key: {err}"
                        )));
                    }
                }
                remote => {
                    if let Some(command) = engine_command(remote) {
                        report_info!("Submitting request {}", command.request_id());
                        self.engine.submit(command);
                    }
                }
            }
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(EVENT_POLL) {
                if event_msgs(event)
                    .into_iter()
                    .any(|msg| msg_tx.send(msg).is_err())
                {
                    break;
                }
            }
        });
    }
}

/// Reads a reference document; failures become a visible error.
pub fn attachment_msg(path: &Path) -> Msg {
    match load_attachment(path) {
        Ok(attachment) => {
            report_info!(
                "Attached {} ({}, {} base64 chars)",
                attachment.name,
                attachment.mime_type,
                attachment.data.len()
            );
            Msg::AttachmentAdded(attachment)
        }
        Err(err) => {
            report_warn!("Attachment failed: {}", err);
            Msg::AttachmentFailed(err.to_string())
        }
    }
}

fn engine_command(effect: Effect) -> Option<EngineCommand> {
    let command = match effect {
        Effect::GenerateHeadlines { request_id, input } => {
            EngineCommand::GenerateHeadlines { request_id, input }
        }
        Effect::GenerateMoreHeadlines {
            request_id,
            input,
            existing,
        } => EngineCommand::MoreHeadlines {
            request_id,
            input,
            existing,
        },
        Effect::WriteDraft {
            request_id,
            input,
            headline,
        } => EngineCommand::WriteDraft {
            request_id,
            input,
            headline,
        },
        Effect::RestyleDraft {
            request_id,
            style,
            base,
        } => EngineCommand::RestyleDraft {
            request_id,
            style,
            base,
        },
        Effect::ReviseDraft {
            request_id,
            style,
            previous,
            feedback,
        } => EngineCommand::ReviseDraft {
            request_id,
            style,
            previous,
            feedback,
        },
        Effect::ExportResults { .. } | Effect::PersistCredential { .. } => return None,
    };
    Some(command)
}

/// The result message for an event, followed by `CredentialRejected` when
/// the failure came from a missing or refused key.
fn event_msgs(event: EngineEvent) -> Vec<Msg> {
    let rejected = matches!(
        event.failure_kind(),
        Some(FailureKind::MissingCredential | FailureKind::InvalidCredential)
    );
    let mut msgs = vec![event_msg(event)];
    if rejected {
        msgs.push(Msg::CredentialRejected);
    }
    msgs
}

fn event_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::HeadlinesGenerated { request_id, result } => Msg::HeadlinesGenerated {
            request_id,
            result: describe(request_id, result),
        },
        EngineEvent::MoreHeadlinesGenerated { request_id, result } => {
            Msg::MoreHeadlinesGenerated {
                request_id,
                result: describe(request_id, result),
            }
        }
        EngineEvent::DraftWritten { request_id, result } => Msg::DraftWritten {
            request_id,
            result: describe(request_id, result),
        },
        EngineEvent::DraftStyleWritten {
            request_id,
            style,
            result,
        } => Msg::DraftStyleWritten {
            request_id,
            style,
            result: describe(request_id, result),
        },
    }
}

fn describe<T>(request_id: RequestId, result: Result<T, GenerateError>) -> Result<T, String> {
    result.map_err(|err| {
        report_warn!("Request {} failed: {}", request_id, err);
        err.to_string()
    })
}
