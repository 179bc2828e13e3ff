use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use report_logging::{report_debug, report_error};

use crate::generator::Generator;
use crate::{EngineCommand, EngineEvent, FailureKind, GenerateError};

/// Owns the worker thread that runs generator calls on a tokio runtime.
/// Commands go in, events come back in completion order. The handle is
/// `Sync` so one thread can submit while another drains events.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    report_error!("Failed to start engine runtime: {}", err);
                    let message = format!("engine runtime unavailable: {err}");
                    while let Ok(command) = cmd_rx.recv() {
                        let error = GenerateError::new(FailureKind::Internal, message.clone());
                        let _ = event_tx.send(failure_event(&command, error));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                report_debug!("Engine accepted request {}", command.request_id());
                let generator = generator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(generator.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.events().try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.events().recv_timeout(timeout).ok()
    }

    fn events(&self) -> std::sync::MutexGuard<'_, mpsc::Receiver<EngineEvent>> {
        self.event_rx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn handle_command(generator: &dyn Generator, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::GenerateHeadlines { request_id, input } => EngineEvent::HeadlinesGenerated {
            request_id,
            result: generator.generate_headlines(&input).await,
        },
        EngineCommand::MoreHeadlines {
            request_id,
            input,
            existing,
        } => EngineEvent::MoreHeadlinesGenerated {
            request_id,
            result: generator.more_headlines(&input, &existing).await,
        },
        EngineCommand::WriteDraft {
            request_id,
            input,
            headline,
        } => EngineEvent::DraftWritten {
            request_id,
            result: generator.write_draft(&input, &headline).await,
        },
        EngineCommand::RestyleDraft {
            request_id,
            style,
            base,
        } => EngineEvent::DraftStyleWritten {
            request_id,
            style,
            result: generator.change_draft_style(&base, style).await,
        },
        EngineCommand::ReviseDraft {
            request_id,
            style,
            previous,
            feedback,
        } => EngineEvent::DraftStyleWritten {
            request_id,
            style,
            result: generator.regenerate_draft(&previous, &feedback).await,
        },
    }
}

fn failure_event(command: &EngineCommand, error: GenerateError) -> EngineEvent {
    let request_id = command.request_id();
    match command {
        EngineCommand::GenerateHeadlines { .. } => EngineEvent::HeadlinesGenerated {
            request_id,
            result: Err(error),
        },
        EngineCommand::MoreHeadlines { .. } => EngineEvent::MoreHeadlinesGenerated {
            request_id,
            result: Err(error),
        },
        EngineCommand::WriteDraft { .. } => EngineEvent::DraftWritten {
            request_id,
            result: Err(error),
        },
        EngineCommand::RestyleDraft { style, .. } | EngineCommand::ReviseDraft { style, .. } => {
            EngineEvent::DraftStyleWritten {
                request_id,
                style: *style,
                result: Err(error),
            }
        }
    }
}
