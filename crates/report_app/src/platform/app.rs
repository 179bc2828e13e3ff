use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use report_core::{update, AppState, Msg};
use report_engine::{CredentialStore, FileCredentialStore, GeminiGenerator, GeneratorSettings};
use report_logging::{report_info, report_warn};

use super::commands::{self, Action, CommandError};
use super::effects::{attachment_msg, EffectRunner};
use super::render::render;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Startup options collected from the command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub output_dir: PathBuf,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let credentials: Arc<dyn CredentialStore> = Arc::new(
        FileCredentialStore::in_config_dir().context("locating the credential store")?,
    );

    let mut settings = GeneratorSettings::from_env();
    if let Some(model) = config.model {
        settings.model = model;
    }
    if let Some(endpoint) = config.endpoint {
        settings.endpoint = endpoint;
    }
    report_info!(
        "Starting with model {} at {}, exporting to {:?}",
        settings.model,
        settings.endpoint,
        config.output_dir
    );

    let generator = Arc::new(GeminiGenerator::new(settings, credentials.clone()));
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(
        generator,
        credentials.clone(),
        config.output_dir,
        msg_tx.clone(),
    );

    let present = match credentials.load() {
        Ok(key) => key.is_some(),
        Err(err) => {
            report_warn!("Could not read stored API key: {}", err);
            false
        }
    };
    let _ = msg_tx.send(Msg::CredentialLoaded { present });

    let line_rx = spawn_line_reader();
    let mut state = AppState::new();
    let stdout = io::stdout();

    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            state = dispatch(state, msg, &runner);
        }
        if state.consume_dirty() {
            let mut out = stdout.lock();
            write!(out, "{}> ", render(&state.view()))?;
            out.flush()?;
        }

        let line = match line_rx.recv_timeout(INPUT_POLL) {
            Ok(line) => line,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        let action = commands::parse_command(&line)
            .and_then(|command| commands::resolve(command, &state.view()));
        match action {
            Ok(Action::Dispatch(msg)) => state = dispatch(state, msg, &runner),
            Ok(Action::Attach(path)) => state = dispatch(state, attachment_msg(&path), &runner),
            Ok(Action::Show) => {
                let mut out = stdout.lock();
                write!(out, "{}> ", render(&state.view()))?;
                out.flush()?;
            }
            Ok(Action::Help) => prompt_line(&stdout, commands::HELP)?,
            Ok(Action::Quit) => break,
            Err(CommandError::Empty) => prompt_line(&stdout, "")?,
            Err(err) => prompt_line(&stdout, &err.to_string())?,
        }
    }

    report_info!("Session ended");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn prompt_line(stdout: &io::Stdout, text: &str) -> io::Result<()> {
    let mut out = stdout.lock();
    if !text.is_empty() {
        writeln!(out, "{text}")?;
    }
    write!(out, "> ")?;
    out.flush()
}

/// Blocking stdin reads run on their own thread so engine answers keep
/// arriving while the user types.
fn spawn_line_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}
