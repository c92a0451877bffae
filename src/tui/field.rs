//! Editable text behind the prompt's input field.
//!
//! The REPL state owns the field's value; this editor only tracks the cursor
//! and turns edits into `Change` events carrying the new value. After every
//! dispatch the caller re-syncs the editor from the state, so an edit the
//! session ignored snaps back.

use crate::view::UiEvent;

/// One editing operation on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Ctrl-W.
    DeleteWordBefore,
    /// Ctrl-U.
    ClearToStart,
}

/// Field value plus a cursor in char indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEditor {
    value: String,
    cursor: usize,
}

impl FieldEditor {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Adopt `value` as the field content.
    ///
    /// The cursor stays put when the content is unchanged and moves to the
    /// end otherwise.
    pub fn sync(&mut self, value: &str) {
        if self.value == value {
            return;
        }
        self.value = value.to_string();
        self.cursor = char_count(&self.value);
    }

    /// Apply an edit, returning `Change` when the content changed.
    pub fn apply(&mut self, edit: FieldEdit) -> Option<UiEvent> {
        let len = char_count(&self.value);
        self.cursor = self.cursor.min(len);
        match edit {
            FieldEdit::Insert(ch) => {
                let at = byte_index_at_char(&self.value, self.cursor);
                self.value.insert(at, ch);
                self.cursor += 1;
            }
            FieldEdit::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                delete_char_range(&mut self.value, self.cursor - 1, self.cursor);
                self.cursor -= 1;
            }
            FieldEdit::Delete => {
                if self.cursor >= len {
                    return None;
                }
                delete_char_range(&mut self.value, self.cursor, self.cursor + 1);
            }
            FieldEdit::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                return None;
            }
            FieldEdit::Right => {
                self.cursor = (self.cursor + 1).min(len);
                return None;
            }
            FieldEdit::Home => {
                self.cursor = 0;
                return None;
            }
            FieldEdit::End => {
                self.cursor = len;
                return None;
            }
            FieldEdit::DeleteWordBefore => {
                let start = previous_word_start(&self.value, self.cursor);
                if start == self.cursor {
                    return None;
                }
                delete_char_range(&mut self.value, start, self.cursor);
                self.cursor = start;
            }
            FieldEdit::ClearToStart => {
                if self.cursor == 0 {
                    return None;
                }
                delete_char_range(&mut self.value, 0, self.cursor);
                self.cursor = 0;
            }
        }
        Some(UiEvent::Change(self.value.clone()))
    }
}

fn delete_char_range(buffer: &mut String, start_char: usize, end_char: usize) {
    if start_char >= end_char {
        return;
    }
    let start = byte_index_at_char(buffer, start_char);
    let end = byte_index_at_char(buffer, end_char);
    buffer.replace_range(start..end, "");
}

/// Char index where the word before `cursor` starts, skipping trailing blanks.
fn previous_word_start(buffer: &str, cursor: usize) -> usize {
    let chars: Vec<char> = buffer.chars().take(cursor).collect();
    let mut idx = chars.len();
    while idx > 0 && chars[idx - 1].is_whitespace() {
        idx -= 1;
    }
    while idx > 0 && !chars[idx - 1].is_whitespace() {
        idx -= 1;
    }
    idx
}

/// Convert a char index to a byte index, preserving UTF-8 boundaries.
pub(crate) fn byte_index_at_char(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

pub(crate) fn char_count(s: &str) -> usize {
    s.chars().count()
}
