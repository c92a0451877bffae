//! REPL state machine driven by an asynchronous evaluator.
//!
//! With an async evaluator `Submit` cannot finish inside the reducer, so the
//! session adds an implicit `pending` phase between handing out a request and
//! receiving its response:
//! - at most one evaluation is outstanding; `Submit` while pending is ignored;
//! - the input stays frozen on the submitted request until the response is
//!   known, then it is cleared together with recording the exchange;
//! - exchanges appear in submission order.

use crate::error::EvalError;
use crate::repl::evaluator::{response_text, AsyncEvaluator};
use crate::repl::reduce::{Action, ReduceOptions};
use crate::repl::state::ReplState;
use std::time::Instant;

/// Identifies one outstanding evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Evaluation the caller must run and report back through [`Session::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub ticket: Ticket,
    pub request: String,
}

/// Why an action did not change the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Another evaluation is still outstanding.
    Pending,
    /// Empty submit while `skip_empty_submit` is set.
    EmptySubmit,
}

/// Outcome of dispatching one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// State changed; nothing else to do.
    Updated,
    /// State entered the pending phase; run this evaluation.
    Evaluate(EvaluationRequest),
    Ignored(Ignored),
}

#[derive(Debug, Clone)]
struct Pending {
    ticket: Ticket,
    started_at: Instant,
}

/// Owner of one [`ReplState`] plus the pending-evaluation bookkeeping.
#[derive(Debug, Default)]
pub struct Session {
    state: ReplState,
    options: ReduceOptions,
    pending: Option<Pending>,
    next_ticket: u64,
}

impl Session {
    pub fn new(options: ReduceOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &ReplState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the outstanding evaluation started, if any.
    pub fn pending_since(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.started_at)
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        match action {
            Action::InputChanged(text) => {
                if self.pending.is_some() {
                    tracing::debug!("input change ignored while evaluation is pending");
                    return Dispatch::Ignored(Ignored::Pending);
                }
                let state = std::mem::take(&mut self.state);
                self.state = state.with_input(text);
                Dispatch::Updated
            }
            Action::Submit => {
                if self.pending.is_some() {
                    tracing::debug!("submit suppressed while evaluation is pending");
                    return Dispatch::Ignored(Ignored::Pending);
                }
                if self.options.skip_empty_submit && self.state.input().is_empty() {
                    return Dispatch::Ignored(Ignored::EmptySubmit);
                }
                let ticket = Ticket(self.next_ticket);
                self.next_ticket += 1;
                self.pending = Some(Pending {
                    ticket,
                    started_at: Instant::now(),
                });
                tracing::debug!(ticket = ticket.id(), "evaluation started");
                Dispatch::Evaluate(EvaluationRequest {
                    ticket,
                    request: self.state.input().to_string(),
                })
            }
        }
    }

    /// Report the outcome of an evaluation handed out by [`Session::dispatch`].
    ///
    /// Returns `false` (and leaves the state untouched) when `ticket` is not
    /// the outstanding evaluation.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<String, EvalError>) -> bool {
        let Some(pending) = self.pending.as_ref() else {
            tracing::warn!(ticket = ticket.id(), "completion without pending evaluation");
            return false;
        };
        if pending.ticket != ticket {
            tracing::warn!(
                ticket = ticket.id(),
                expected = pending.ticket.id(),
                "stale evaluation completion dropped"
            );
            return false;
        }
        let elapsed = pending.started_at.elapsed();
        self.pending = None;

        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "evaluation failed");
        }
        tracing::debug!(
            ticket = ticket.id(),
            elapsed_ms = elapsed.as_millis() as u64,
            "evaluation finished"
        );
        let request = self.state.input().to_string();
        let state = std::mem::take(&mut self.state);
        self.state = state.with_exchange(request, response_text(outcome));
        true
    }

    /// Dispatch `Submit` and, if it starts an evaluation, run it to completion.
    pub async fn submit<E>(&mut self, evaluator: &mut E) -> Dispatch
    where
        E: AsyncEvaluator + ?Sized,
    {
        let dispatch = self.dispatch(Action::Submit);
        if let Dispatch::Evaluate(job) = &dispatch {
            let outcome = evaluator.evaluate(&job.request).await;
            self.complete(job.ticket, outcome);
        }
        dispatch
    }
}
