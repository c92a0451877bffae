//! Error types for configuration loading and evaluator calls.
//!
//! The REPL state machine itself has no error kinds: evaluator failures are
//! mapped to response text before they reach the history.

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// EvalError
// ---------------------------------------------------------------------------

/// Failures of an evaluator capability.
#[derive(Debug)]
pub enum EvalError {
    /// The evaluator process could not be started.
    Spawn(std::io::Error),
    /// Talking to a running evaluator failed (stdin/stdout plumbing).
    Io(std::io::Error),
    /// The evaluator did not answer within its deadline.
    Timeout(Duration),
    /// The evaluator is gone or refused the request.
    Unavailable(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "failed to start evaluator: {e}"),
            Self::Io(e) => write!(f, "evaluator io: {e}"),
            Self::Timeout(after) => {
                write!(f, "evaluator timed out after {:.1}s", after.as_secs_f64())
            }
            Self::Unavailable(msg) => write!(f, "evaluator unavailable: {msg}"),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<std::io::Error> for EvalError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn config_error_invalid_message() {
        let e = ConfigError::Invalid("evaluator.program is required".into());
        assert_eq!(
            e.to_string(),
            "invalid config: evaluator.program is required"
        );
    }

    #[test]
    fn eval_error_display_variants() {
        assert_eq!(
            EvalError::Timeout(Duration::from_millis(1500)).to_string(),
            "evaluator timed out after 1.5s"
        );
        assert_eq!(
            EvalError::Unavailable("worker stopped".into()).to_string(),
            "evaluator unavailable: worker stopped"
        );
        let spawn = EvalError::Spawn(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert!(spawn.to_string().starts_with("failed to start evaluator:"));
    }

    #[test]
    fn eval_error_from_io_is_plumbing_failure() {
        let e = EvalError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe"));
        assert!(matches!(e, EvalError::Io(_)));
        assert!(e.to_string().contains("pipe"));
    }
}
