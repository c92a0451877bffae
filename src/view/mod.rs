//! Render projection: REPL state to a visual tree.
//!
//! The tree is plain data. Painting it onto a terminal lives in `tui`; this
//! module only decides what is shown and in which order.

pub mod events;

use crate::repl::{Exchange, ReplState};

pub use events::{action_for, Key, UiEvent};

/// Marker in front of submitted commands and the live prompt.
pub const PROMPT_MARKER: &str = "> ";
/// Indent in front of every response line.
pub const RESPONSE_INDENT: &str = "  ";

/// Full view: scrollback followed by the live prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualTree {
    pub scrollback: Vec<ExchangeBlock>,
    pub prompt: PromptLine,
}

/// Rendered form of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeBlock {
    /// `"> "` followed by the command.
    pub command_line: String,
    /// One `"  "`-prefixed line per newline-separated response segment.
    pub response_lines: Vec<String>,
}

/// Static marker plus the editable input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    pub marker: &'static str,
    pub field: TextField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
    pub autofocus: bool,
}

/// Kind of a flattened scrollback line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Command,
    Response,
}

impl ExchangeBlock {
    pub fn from_exchange(exchange: &Exchange) -> Self {
        Self {
            command_line: format!("{PROMPT_MARKER}{}", exchange.command()),
            response_lines: exchange
                .response()
                .split('\n')
                .map(|segment| format!("{RESPONSE_INDENT}{segment}"))
                .collect(),
        }
    }

    /// Lines of this block, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = (LineKind, &str)> {
        std::iter::once((LineKind::Command, self.command_line.as_str())).chain(
            self.response_lines
                .iter()
                .map(|line| (LineKind::Response, line.as_str())),
        )
    }
}

impl VisualTree {
    /// Every scrollback line, top to bottom.
    pub fn scrollback_lines(&self) -> impl Iterator<Item = (LineKind, &str)> {
        self.scrollback.iter().flat_map(|block| block.lines())
    }

    /// Plain text of the whole view, one entry per row, prompt last.
    pub fn text_lines(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .scrollback_lines()
            .map(|(_, line)| line.to_string())
            .collect();
        out.push(format!("{}{}", self.prompt.marker, self.prompt.field.value));
        out
    }
}

/// Project the state onto a visual tree.
///
/// History is shown in stored order (most recent first), then the prompt.
pub fn render(state: &ReplState) -> VisualTree {
    VisualTree {
        scrollback: state
            .history()
            .iter()
            .map(ExchangeBlock::from_exchange)
            .collect(),
        prompt: PromptLine {
            marker: PROMPT_MARKER,
            field: TextField {
                value: state.input().to_string(),
                autofocus: true,
            },
        },
    }
}
