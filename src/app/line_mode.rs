//! Line-oriented mode for piped input and `--json`.
//!
//! Each stdin line becomes `InputChanged(line)` followed by `Submit`, and the
//! resulting exchange is printed to stdout as soon as it completes.

use crate::app::entry::ModeInputs;
use crate::app::is_exit_request;
use eml_repl::repl::{Action, Dispatch, Exchange, Ignored, Session};
use eml_repl::tui::Renderer;
use eml_repl::view::ExchangeBlock;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

pub(crate) async fn run_line_mode(mut inputs: ModeInputs) -> i32 {
    let reader = BufReader::new(tokio::io::stdin());
    run_lines(&mut inputs, reader, &mut io::stdout()).await
}

/// Drive one session from `reader`, writing each exchange to `out`.
pub(crate) async fn run_lines<R, W>(inputs: &mut ModeInputs, reader: R, out: &mut W) -> i32
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session::new(inputs.reduce_options());
    let mut lines = reader.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                inputs.renderer.error(&format!("failed to read input: {err}"));
                return 1;
            }
        };
        if is_exit_request(&line, &inputs.config.repl.exit_command) {
            tracing::debug!("exit command received");
            break;
        }

        session.dispatch(Action::InputChanged(line));
        match session.submit(inputs.evaluator.as_mut()).await {
            Dispatch::Evaluate(_) => {}
            Dispatch::Ignored(Ignored::EmptySubmit) => continue,
            other => {
                tracing::warn!(?other, "unexpected submit outcome in line mode");
                continue;
            }
        }
        let Some(exchange) = session.state().history().latest() else {
            continue;
        };
        if let Err(err) = print_exchange(&inputs.renderer, out, exchange, inputs.json) {
            // Downstream closed (e.g. `| head`); stop quietly.
            tracing::debug!(error = %err, "stdout closed");
            return 0;
        }
    }
    0
}

/// Write one exchange as a text block or a single JSON line.
pub(crate) fn print_exchange<W: Write>(
    renderer: &Renderer,
    out: &mut W,
    exchange: &Exchange,
    json: bool,
) -> io::Result<()> {
    if json {
        let encoded = serde_json::to_string(exchange).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to encode exchange: {err}"),
            )
        })?;
        writeln!(out, "{encoded}")?;
        return out.flush();
    }
    renderer.write_block(out, &ExchangeBlock::from_exchange(exchange))
}
