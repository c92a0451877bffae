//! `tracing` subscriber setup.
//!
//! Logs go to `logging.file` when configured, otherwise to stderr. The
//! full-screen view owns the terminal, so interactive sessions should point
//! logs at a file when raising the level above `warn`.

use crate::config::LoggingConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Build the filter for a directive such as `warn` or `eml_repl=debug`.
pub fn build_filter(directive: &str) -> Result<EnvFilter, String> {
    EnvFilter::try_new(directive.trim())
        .map_err(|err| format!("invalid log filter `{directive}`: {err}"))
}

/// Install the global subscriber.
///
/// A second call keeps the first subscriber and reports no error.
pub fn init(config: &LoggingConfig) -> Result<(), String> {
    let filter = build_filter(&config.level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|err| format!("failed to open log file {}: {err}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
