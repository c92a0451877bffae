//! Terminal output: full-screen frames, line-mode blocks and messages.

use crate::tui::layout::{Frame, RowKind};
use crate::tui::settings;
use crate::view::ExchangeBlock;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Stateless styling front end shared by every output path.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print a warning message (to stderr).
    pub fn warn(&self, msg: &str) {
        self.label_line(settings::LABEL_WARNING, settings::COLOR_WARNING, msg);
    }

    /// Print an error message (to stderr).
    pub fn error(&self, msg: &str) {
        self.label_line(settings::LABEL_ERROR, settings::COLOR_ERROR, msg);
    }

    fn label_line(&self, label: &str, color: Color, msg: &str) {
        if self.color {
            eprintln!("\r{} {msg}", label.with(color).bold());
        } else {
            eprintln!("\r{label} {msg}");
        }
    }

    /// Write one exchange block, one line per row, for line mode.
    pub fn write_block<W: Write>(&self, out: &mut W, block: &ExchangeBlock) -> io::Result<()> {
        for (kind, line) in block.lines() {
            self.write_styled(out, RowKind::from(kind), line)?;
            out.queue(Print("\n"))?;
        }
        out.flush()
    }

    fn write_styled<W: Write>(&self, out: &mut W, kind: RowKind, text: &str) -> io::Result<()> {
        if !self.color {
            out.queue(Print(text))?;
            return Ok(());
        }
        match kind {
            RowKind::Command => {
                out.queue(PrintStyledContent(text.with(settings::COLOR_COMMAND).bold()))?;
            }
            RowKind::Response => {
                out.queue(PrintStyledContent(text.with(settings::COLOR_RESPONSE)))?;
            }
            RowKind::Status => {
                out.queue(PrintStyledContent(
                    text.with(settings::COLOR_STATUS_LINE).italic(),
                ))?;
            }
            RowKind::Prompt => {
                out.queue(PrintStyledContent(text.with(settings::COLOR_PROMPT_SYMBOL)))?;
            }
        }
        Ok(())
    }
}

/// Paints frames onto a full-screen surface, skipping unchanged frames.
#[derive(Debug)]
pub struct ScreenPainter {
    renderer: Renderer,
    header: Option<String>,
    last: Option<(Frame, bool)>,
}

impl ScreenPainter {
    /// `header` is pinned to the first screen row above every frame.
    pub fn new(renderer: Renderer, header: Option<String>) -> Self {
        Self {
            renderer,
            header,
            last: None,
        }
    }

    /// Rows left for the frame on a terminal with `total_rows` rows.
    pub fn body_rows(&self, total_rows: usize) -> usize {
        total_rows.saturating_sub(usize::from(self.header_fits(total_rows)))
    }

    /// The header is dropped when it would leave no row for the prompt.
    fn header_fits(&self, total_rows: usize) -> bool {
        self.header.is_some() && total_rows >= 2
    }

    /// Force the next [`ScreenPainter::paint`] to redraw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `frame` on a terminal with `total_rows` rows; returns `false`
    /// when nothing changed since the previous call.
    pub fn paint<W: Write>(
        &mut self,
        out: &mut W,
        frame: &Frame,
        total_rows: usize,
    ) -> io::Result<bool> {
        let show_header = self.header_fits(total_rows);
        if let Some((last, last_header)) = &self.last {
            if last == frame && *last_header == show_header {
                return Ok(false);
            }
        }

        let mut row: u16 = 0;
        if let Some(header) = self.header.as_ref().filter(|_| show_header) {
            out.queue(MoveTo(0, row))?;
            if self.renderer.color {
                out.queue(PrintStyledContent(header.as_str().with(settings::COLOR_BANNER)))?;
            } else {
                out.queue(Print(header.as_str()))?;
            }
            out.queue(Clear(ClearType::UntilNewLine))?;
            row += 1;
        }
        let top = row;

        for frame_row in &frame.rows {
            out.queue(MoveTo(0, row))?;
            self.renderer
                .write_styled(out, frame_row.kind, &frame_row.text)?;
            out.queue(Clear(ClearType::UntilNewLine))?;
            row = row.saturating_add(1);
        }
        out.queue(MoveTo(0, row))?;
        out.queue(Clear(ClearType::FromCursorDown))?;

        let cursor_row = top.saturating_add(u16::try_from(frame.cursor_row).unwrap_or(u16::MAX));
        let cursor_col = u16::try_from(frame.cursor_col).unwrap_or(u16::MAX);
        out.queue(MoveTo(cursor_col, cursor_row))?;
        out.flush()?;

        self.last = Some((frame.clone(), show_header));
        Ok(true)
    }
}
