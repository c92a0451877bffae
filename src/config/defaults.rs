//! Default configuration constants.

/// Embedded default `eml-repl.toml` written by `eml-repl init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/eml-repl.toml");
/// File name used for both the local and the global config.
pub(super) const CONFIG_FILE_NAME: &str = "eml-repl.toml";
/// Directory under the config root holding the global config.
pub(super) const CONFIG_DIR_NAME: &str = "eml-repl";
/// Input that ends the session.
pub(super) const DEFAULT_EXIT_COMMAND: &str = "exit()";
/// Default `tracing` filter directive.
pub(super) const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variable overriding `logging.level`.
pub const ENV_LOG: &str = "EML_REPL_LOG";
/// Environment variable selecting a command evaluator (`program args...`).
pub const ENV_EVAL_CMD: &str = "EML_REPL_EVAL_CMD";
/// Conventional variable disabling colored output when non-empty.
pub const ENV_NO_COLOR: &str = "NO_COLOR";
