//! eml-repl: a read-eval-print loop for Embedded ML.
//!
//! The REPL core is a small state machine: typed input and submits are
//! [`repl::Action`]s, an injected [`repl::Evaluator`] turns each submitted
//! command into a response, and the resulting [`repl::ReplState`] is projected
//! by [`view::render`] onto a plain visual tree that `tui` paints.
//!
//! # Quick start
//!
//! ```
//! use eml_repl::repl::{reduce, Action, EchoEvaluator, ReplState};
//!
//! let mut evaluator = EchoEvaluator;
//! let state = reduce(ReplState::new(), Action::InputChanged("1+1".into()), &mut evaluator);
//! let state = reduce(state, Action::Submit, &mut evaluator);
//! assert_eq!(state.history().latest().map(|e| e.response()), Some("1+1"));
//! assert_eq!(state.input(), "");
//! ```

pub mod build_info;
pub mod config;
pub mod error;
pub mod logging;
pub mod repl;
#[cfg(test)]
pub mod testsupport;
pub mod tui;
pub mod view;
