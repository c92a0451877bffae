//! Configuration data model.
//!
//! Struct/enum definitions plus their defaults. Source discovery and env
//! overrides live in `config::mod`.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{DEFAULT_EXIT_COMMAND, DEFAULT_LOG_LEVEL};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub display: DisplayConfig,
    pub repl: ReplConfig,
    pub evaluator: EvaluatorConfig,
    pub logging: LoggingConfig,
}

/// Terminal presentation settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub color: bool,
    pub banner: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            banner: true,
        }
    }
}

/// Input handling settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReplConfig {
    /// Submitting exactly this text ends the session. Empty disables it.
    pub exit_command: String,
    pub skip_empty_submit: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            exit_command: DEFAULT_EXIT_COMMAND.to_string(),
            skip_empty_submit: false,
        }
    }
}

/// Which evaluator backs the REPL.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    #[default]
    Echo,
    Command,
}

/// Evaluator settings under `[evaluator]`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    pub kind: EvaluatorKind,
    /// Program to run for `kind = "command"`.
    pub program: Option<String>,
    pub args: Vec<String>,
    pub strip_trailing_newline: bool,
    pub timeout_secs: Option<u64>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            kind: EvaluatorKind::Echo,
            program: None,
            args: Vec::new(),
            strip_trailing_newline: true,
            timeout_secs: None,
        }
    }
}

impl EvaluatorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// `tracing` output settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `warn` or `eml_repl=debug`.
    pub level: String,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// Where the effective config text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config <path>`.
    Explicit(PathBuf),
    /// `./eml-repl.toml`.
    Local,
    /// `<config root>/eml-repl/eml-repl.toml`.
    Global(PathBuf),
    BuiltInDefaults,
}

/// Loaded config plus the source it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Result of `eml-repl init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created { path: PathBuf },
    AlreadyInitialized { path: PathBuf },
    Overwritten { path: PathBuf, backup_path: PathBuf },
}
