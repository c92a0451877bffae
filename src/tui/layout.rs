//! Terminal row/column layout for the full-screen REPL view.
//!
//! Layout is pure: it maps a [`VisualTree`] onto a fixed-size grid. The frame
//! is anchored at the top: scrollback (most recent first), an optional status
//! row, then the prompt. Scrollback that does not fit is cut at the bottom
//! so the prompt always stays on screen.

use crate::tui::field::char_count;
use crate::view::{LineKind, VisualTree};
use crossterm::terminal;

/// Role of a painted row, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Command,
    Response,
    Status,
    Prompt,
}

impl From<LineKind> for RowKind {
    fn from(kind: LineKind) -> Self {
        match kind {
            LineKind::Command => RowKind::Command,
            LineKind::Response => RowKind::Response,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub kind: RowKind,
    /// Text clipped to the terminal width, free of control characters.
    pub text: String,
}

/// Computed screen content plus cursor placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<FrameRow>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

/// Read the terminal size or fall back to 80x24.
pub fn terminal_size() -> (usize, usize) {
    terminal::size()
        .ok()
        .map(|(cols, rows)| (cols as usize, rows as usize))
        .filter(|(cols, rows)| *cols > 0 && *rows > 0)
        .unwrap_or((80, 24))
}

/// Lay out `tree` on a `cols` x `rows` surface.
///
/// `cursor` is the field cursor in char indices.
pub fn layout_frame(
    tree: &VisualTree,
    cursor: usize,
    cols: usize,
    rows: usize,
    status: Option<&str>,
) -> Frame {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let reserved = 1 + usize::from(status.is_some());
    let scrollback_rows = rows.saturating_sub(reserved);

    let mut out: Vec<FrameRow> = tree
        .scrollback_lines()
        .take(scrollback_rows)
        .map(|(kind, line)| FrameRow {
            kind: kind.into(),
            text: display_text(line, cols),
        })
        .collect();

    if let Some(status) = status {
        if rows > 1 {
            out.push(FrameRow {
                kind: RowKind::Status,
                text: display_text(status, cols),
            });
        }
    }

    let (prompt_text, cursor_col) =
        prompt_row(tree.prompt.marker, &tree.prompt.field.value, cursor, cols);
    let cursor_row = out.len();
    out.push(FrameRow {
        kind: RowKind::Prompt,
        text: prompt_text,
    });

    Frame {
        rows: out,
        cursor_row,
        cursor_col,
    }
}

/// Render the prompt row, scrolling the field so the cursor stays visible.
fn prompt_row(marker: &str, value: &str, cursor: usize, cols: usize) -> (String, usize) {
    let marker = clip_to_width(marker, cols.saturating_sub(1));
    let marker_width = char_count(&marker);
    let field_width = cols.saturating_sub(marker_width).max(1);
    let cursor = cursor.min(char_count(value));

    let offset = if cursor < field_width {
        0
    } else {
        cursor + 1 - field_width
    };
    let visible: String = value
        .chars()
        .skip(offset)
        .take(field_width)
        .map(blank_control)
        .collect();
    (
        format!("{marker}{visible}"),
        marker_width + (cursor - offset),
    )
}

/// Clip a string to at most `max_width` visible characters.
fn clip_to_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Clip like [`clip_to_width`], painting each control character (`\r`, tab,
/// ESC, ...) as one blank cell so it cannot move the terminal cursor.
fn display_text(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).map(blank_control).collect()
}

fn blank_control(ch: char) -> char {
    if ch.is_control() {
        ' '
    } else {
        ch
    }
}
