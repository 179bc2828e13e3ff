mod platform;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use report_logging::{LogDestination, LogSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

/// Interactive headline and draft generator for management evaluation reports.
#[derive(Debug, Parser)]
#[command(name = "headline-strategist", version)]
struct Args {
    /// Gemini model name (overrides GEMINI_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// API base URL (overrides GEMINI_ENDPOINT).
    #[arg(long)]
    endpoint: Option<String>,

    /// Directory that receives exported results.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Where log lines go.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,

    /// Log at debug level.
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    report_logging::initialize(&LogSettings {
        destination: args.log.into(),
        level: if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        ..LogSettings::default()
    });

    platform::run_app(platform::AppConfig {
        model: args.model,
        endpoint: args.endpoint,
        output_dir: args.output_dir,
    })
}
