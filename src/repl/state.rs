//! REPL state: completed exchanges plus the pending input line.

use serde::Serialize;
use std::collections::VecDeque;

/// One completed evaluation: the submitted command and the evaluator's answer.
///
/// Exchanges are immutable once created; only [`History`] constructs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    command: String,
    response: String,
}

impl Exchange {
    pub(crate) fn new(command: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            response: response.into(),
        }
    }

    /// Submitted input text, verbatim.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Evaluator output, verbatim (may contain newlines).
    pub fn response(&self) -> &str {
        &self.response
    }
}

/// Append-only record of exchanges, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<Exchange>,
}

impl History {
    /// Record a new exchange in front of every earlier one.
    pub(crate) fn record(&mut self, exchange: Exchange) {
        self.entries.push_front(exchange);
    }

    /// Iterate exchanges in stored order (most recent first).
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Exchange> {
        self.entries.iter()
    }

    /// Most recently recorded exchange.
    pub fn latest(&self) -> Option<&Exchange> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Exchange;
    type IntoIter = std::collections::vec_deque::Iter<'a, Exchange>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Whole state of one REPL view.
///
/// Created empty when the view starts and only replaced through
/// [`crate::repl::reduce`] or [`crate::repl::Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplState {
    history: History,
    input: String,
}

impl ReplState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Text typed into the live field and not yet submitted.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn with_input(mut self, text: String) -> Self {
        self.input = text;
        self
    }

    /// Record a completed evaluation and clear the input line.
    pub(crate) fn with_exchange(mut self, request: String, response: String) -> Self {
        self.history.record(Exchange::new(request, response));
        self.input.clear();
        self
    }
}
