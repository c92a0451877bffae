//! REPL interaction state machine.
//!
//! - `state` holds the exchange history and the pending input line.
//! - `reduce` is the pure transition function for synchronous evaluators.
//! - `evaluator` defines the injected evaluator capabilities.
//! - `session` and `worker` drive the same transitions with an async
//!   evaluator, adding the pending phase.

pub mod evaluator;
pub mod reduce;
pub mod session;
pub mod state;
pub mod worker;

pub use evaluator::{
    response_text, AsyncEvaluator, Blocking, CommandEvaluator, EchoEvaluator, Evaluator,
    FnEvaluator, ERROR_MARKER,
};
pub use reduce::{reduce, reduce_with, Action, ReduceOptions};
pub use session::{Dispatch, EvaluationRequest, Ignored, Session, Ticket};
pub use state::{Exchange, History, ReplState};
pub use worker::{spawn_evaluator, EvaluationDone, EvaluationStream, EvaluatorHandle};
