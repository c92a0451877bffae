//! Background task that owns the async evaluator.
//!
//! The interactive loop keeps polling terminal events while an evaluation
//! runs, so the evaluator lives on its own task. Jobs are handled strictly one
//! at a time in arrival order.

use crate::error::EvalError;
use crate::repl::evaluator::AsyncEvaluator;
use crate::repl::session::{EvaluationRequest, Ticket};
use tokio::sync::mpsc;

/// Result of one evaluation job.
#[derive(Debug)]
pub struct EvaluationDone {
    pub ticket: Ticket,
    pub outcome: Result<String, EvalError>,
}

/// Sending side of the evaluator task.
#[derive(Debug, Clone)]
pub struct EvaluatorHandle {
    jobs: mpsc::UnboundedSender<EvaluationRequest>,
}

impl EvaluatorHandle {
    /// Queue one evaluation.
    pub fn submit(&self, job: EvaluationRequest) -> Result<(), EvalError> {
        self.jobs
            .send(job)
            .map_err(|_| EvalError::Unavailable("evaluator task stopped".to_string()))
    }
}

/// Stream of finished evaluations.
pub type EvaluationStream = mpsc::UnboundedReceiver<EvaluationDone>;

/// Spawn the evaluator task on the current tokio runtime.
///
/// The task ends once every [`EvaluatorHandle`] is dropped.
pub fn spawn_evaluator(
    mut evaluator: Box<dyn AsyncEvaluator>,
) -> (EvaluatorHandle, EvaluationStream) {
    let (job_tx, mut job_rx) = mpsc::unbounded_channel::<EvaluationRequest>();
    let (done_tx, done_rx) = mpsc::unbounded_channel::<EvaluationDone>();

    tokio::spawn(async move {
        while let Some(job) = job_rx.recv().await {
            let outcome = evaluator.evaluate(&job.request).await;
            if done_tx
                .send(EvaluationDone {
                    ticket: job.ticket,
                    outcome,
                })
                .is_err()
            {
                break;
            }
        }
        tracing::debug!("evaluator task stopped");
    });

    (EvaluatorHandle { jobs: job_tx }, done_rx)
}
