//! Bridge from raw input-field events to REPL actions.

use crate::repl::Action;

/// Key reported by a key-press on the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

/// Events raised by the live input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    KeyPress(Key),
    /// The field's content after an edit.
    Change(String),
}

/// Map a field event to the action it produces, if any.
///
/// Only Enter submits; every other key press is left to the field itself.
pub fn action_for(event: UiEvent) -> Option<Action> {
    match event {
        UiEvent::KeyPress(Key::Enter) => Some(Action::Submit),
        UiEvent::KeyPress(_) => None,
        UiEvent::Change(value) => Some(Action::InputChanged(value)),
    }
}
