//! Binary-local application orchestration.
//!
//! `entry` loads config and picks a mode; each mode drives one
//! [`eml_repl::repl::Session`] against the configured evaluator.

pub(crate) mod entry;
pub(crate) mod exec_mode;
pub(crate) mod line_mode;
pub(crate) mod repl_mode;

/// Whether submitting `input` should end the session instead of evaluating.
///
/// An empty `exit_command` disables the check.
pub(crate) fn is_exit_request(input: &str, exit_command: &str) -> bool {
    !exit_command.is_empty() && input == exit_command
}
