//! Commitlint - Conventional commit message linter

mod cli;
mod exit_codes;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli, LogFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_level.as_deref(), cli.log_format);

    match cli.execute() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            output::error(&format!("{err:#}"));
            ExitCode::from(exit_codes::from_error(&err))
        }
    }
}

/// Set up tracing with two layers:
/// - Console: stderr, controlled by `--log-level` or RUST_LOG (default: warn)
/// - File: always debug-level JSON to ~/.commitlint/logs/
fn init_tracing(
    level: Option<&str>,
    format: LogFormat,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let console_layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(console_filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(console_filter)
            .boxed(),
    };

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "commitlint.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(console_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    // Fallback: console only
    tracing_subscriber::registry().with(console_layer).init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".commitlint").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
