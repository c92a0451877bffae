//! One-shot mode: evaluate the positional input once, print, exit.

use crate::app::entry::ModeInputs;
use crate::app::line_mode::print_exchange;
use eml_repl::repl::{Action, AsyncEvaluator, Dispatch, Session};
use std::io::Write;

/// Returns 1 when the evaluator failed, even though the failure is still
/// printed as the exchange's response.
pub(crate) async fn run_exec_mode<W: Write>(
    mut inputs: ModeInputs,
    input: String,
    out: &mut W,
) -> i32 {
    let mut session = Session::new(inputs.reduce_options());
    session.dispatch(Action::InputChanged(input));

    let failed = match session.dispatch(Action::Submit) {
        Dispatch::Evaluate(job) => {
            let outcome = inputs.evaluator.evaluate(&job.request).await;
            let failed = outcome.is_err();
            session.complete(job.ticket, outcome);
            failed
        }
        _ => return 0,
    };

    let Some(exchange) = session.state().history().latest() else {
        inputs.renderer.error("evaluation finished without an exchange");
        return 1;
    };
    if let Err(err) = print_exchange(&inputs.renderer, out, exchange, inputs.json) {
        inputs.renderer.error(&format!("failed to write output: {err}"));
        return 1;
    }
    i32::from(failed)
}
