//! Interactive full-screen REPL.
//!
//! One loop owns the session: it drains finished evaluations, repaints the
//! frame, then waits one poll interval for terminal input. Evaluations run on
//! the worker task so the screen keeps updating while they are pending.

use crate::app::entry::ModeInputs;
use crate::app::is_exit_request;
use eml_repl::build_info::banner_line;
use eml_repl::repl::{spawn_evaluator, Action, Dispatch, EvaluatorHandle, Session};
use eml_repl::tui::settings::pending_status_text;
use eml_repl::tui::{
    layout_frame, poll_terminal, terminal_size, FieldEditor, ScreenGuard, ScreenPainter,
    TerminalInput,
};
use eml_repl::view::{action_for, render};
use std::io;

/// Whether the loop keeps going after handling one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

pub(crate) async fn run_repl_mode(inputs: ModeInputs) -> i32 {
    let screen = match ScreenGuard::acquire() {
        Ok(guard) => guard,
        Err(err) => {
            inputs
                .renderer
                .warn(&format!("interactive mode unavailable ({err}); using line mode"));
            return crate::app::line_mode::run_line_mode(inputs).await;
        }
    };

    let mut session = Session::new(inputs.reduce_options());
    let ModeInputs {
        renderer,
        config,
        evaluator,
        ..
    } = inputs;
    let (handle, mut completions) = spawn_evaluator(evaluator);
    let header = config.display.banner.then(banner_line);
    let mut painter = ScreenPainter::new(renderer, header);
    let mut editor = FieldEditor::default();
    let mut stderr = io::stderr();
    tracing::debug!("interactive session started");

    loop {
        while let Ok(done) = completions.try_recv() {
            if session.complete(done.ticket, done.outcome) {
                // Stray log lines may have landed on screen; redraw every row.
                painter.invalidate();
            }
        }
        editor.sync(session.state().input());

        let (cols, rows) = terminal_size();
        let status = session
            .pending_since()
            .map(|started| pending_status_text(started.elapsed()));
        let frame = layout_frame(
            &render(session.state()),
            editor.cursor(),
            cols,
            painter.body_rows(rows),
            status.as_deref(),
        );
        if let Err(err) = painter.paint(&mut stderr, &frame, rows) {
            drop(screen);
            renderer.error(&format!("failed to draw screen: {err}"));
            return 1;
        }

        let input = match tokio::task::block_in_place(|| poll_terminal(&mut editor)) {
            Ok(input) => input,
            Err(err) => {
                drop(screen);
                renderer.error(&format!("failed to read terminal input: {err}"));
                return 1;
            }
        };
        match input {
            TerminalInput::Quit => break,
            TerminalInput::Resize => painter.invalidate(),
            TerminalInput::Nothing => {}
            TerminalInput::Ui(events) => {
                let mut control = LoopControl::Continue;
                for event in events {
                    let Some(action) = action_for(event) else {
                        continue;
                    };
                    control = handle_action(
                        &mut session,
                        &handle,
                        action,
                        &config.repl.exit_command,
                    );
                    if control == LoopControl::Exit {
                        break;
                    }
                }
                if control == LoopControl::Exit {
                    break;
                }
            }
        }
    }
    tracing::debug!(
        exchanges = session.state().history().len(),
        "interactive session ended"
    );
    0
}

/// Route one action into the session, queueing any evaluation it starts.
fn handle_action(
    session: &mut Session,
    handle: &EvaluatorHandle,
    action: Action,
    exit_command: &str,
) -> LoopControl {
    if action == Action::Submit
        && !session.is_pending()
        && is_exit_request(session.state().input(), exit_command)
    {
        tracing::debug!("exit command received");
        return LoopControl::Exit;
    }
    if let Dispatch::Evaluate(job) = session.dispatch(action) {
        let ticket = job.ticket;
        if let Err(err) = handle.submit(job) {
            session.complete(ticket, Err(err));
        }
    }
    LoopControl::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use eml_repl::repl::{Blocking, EchoEvaluator};

    #[tokio::test]
    async fn exit_command_ends_the_loop_without_evaluating() {
        let (handle, mut done) = spawn_evaluator(Box::new(Blocking(EchoEvaluator)));
        let mut session = Session::default();
        session.dispatch(Action::InputChanged("exit()".into()));
        assert_eq!(
            handle_action(&mut session, &handle, Action::Submit, "exit()"),
            LoopControl::Exit
        );
        assert!(!session.is_pending());
        drop(handle);
        assert!(done.recv().await.is_none());
    }

    #[tokio::test]
    async fn submit_queues_one_evaluation_and_completes_it() {
        let (handle, mut done) = spawn_evaluator(Box::new(Blocking(EchoEvaluator)));
        let mut session = Session::default();
        handle_action(&mut session, &handle, Action::InputChanged("1+1".into()), "exit()");
        assert_eq!(
            handle_action(&mut session, &handle, Action::Submit, "exit()"),
            LoopControl::Continue
        );
        assert!(session.is_pending());

        let finished = done.recv().await.expect("evaluation result");
        assert!(session.complete(finished.ticket, finished.outcome));
        let latest = session.state().history().latest().expect("exchange");
        assert_eq!(latest.command(), "1+1");
        assert_eq!(latest.response(), "1+1");
        assert_eq!(session.state().input(), "");
    }
}
