//! Terminal key handling for the interactive REPL.

use crate::tui::field::{FieldEdit, FieldEditor};
use crate::tui::settings;
use crate::view::{Key, UiEvent};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, ExecutableCommand};
use std::io::{self, Write};
use std::time::Duration;

/// What one terminal event means to the REPL loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    /// Field events to route through `view::action_for`, in order.
    Ui(Vec<UiEvent>),
    /// Ctrl-C, or Ctrl-D on an empty field.
    Quit,
    /// Terminal size changed; repaint everything.
    Resize,
    Nothing,
}

/// Wait up to one poll interval for the next terminal event.
pub fn poll_terminal(editor: &mut FieldEditor) -> io::Result<TerminalInput> {
    if !event::poll(Duration::from_millis(settings::REPL_EVENT_POLL_MS))? {
        return Ok(TerminalInput::Nothing);
    }
    Ok(match event::read()? {
        Event::Key(key) => translate_key(key, editor),
        Event::Resize(..) => TerminalInput::Resize,
        Event::Paste(text) => paste(&text, editor),
        _ => TerminalInput::Nothing,
    })
}

/// Map one key event onto field edits and UI events.
pub fn translate_key(key: KeyEvent, editor: &mut FieldEditor) -> TerminalInput {
    if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
        return TerminalInput::Nothing;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => TerminalInput::Quit,
            KeyCode::Char('d') if editor.value().is_empty() => TerminalInput::Quit,
            KeyCode::Char('a') => edit(editor, Key::Other, FieldEdit::Home),
            KeyCode::Char('e') => edit(editor, Key::Other, FieldEdit::End),
            KeyCode::Char('w') => edit(editor, Key::Other, FieldEdit::DeleteWordBefore),
            KeyCode::Char('u') => edit(editor, Key::Other, FieldEdit::ClearToStart),
            _ => TerminalInput::Ui(vec![UiEvent::KeyPress(Key::Other)]),
        };
    }

    match key.code {
        KeyCode::Enter => TerminalInput::Ui(vec![UiEvent::KeyPress(Key::Enter)]),
        KeyCode::Char(ch) => edit(editor, Key::Char(ch), FieldEdit::Insert(ch)),
        KeyCode::Backspace => edit(editor, Key::Other, FieldEdit::Backspace),
        KeyCode::Delete => edit(editor, Key::Other, FieldEdit::Delete),
        KeyCode::Left => edit(editor, Key::Other, FieldEdit::Left),
        KeyCode::Right => edit(editor, Key::Other, FieldEdit::Right),
        KeyCode::Home => edit(editor, Key::Other, FieldEdit::Home),
        KeyCode::End => edit(editor, Key::Other, FieldEdit::End),
        _ => TerminalInput::Ui(vec![UiEvent::KeyPress(Key::Other)]),
    }
}

fn edit(editor: &mut FieldEditor, key: Key, edit: FieldEdit) -> TerminalInput {
    let mut events = vec![UiEvent::KeyPress(key)];
    events.extend(editor.apply(edit));
    TerminalInput::Ui(events)
}

/// Pasted text is inserted as-is, with each line break (`\n`, `\r\n` or a
/// lone `\r`) flattened to one space.
fn paste(text: &str, editor: &mut FieldEditor) -> TerminalInput {
    let mut last = None;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        let ch = match ch {
            '\r' => {
                chars.next_if_eq(&'\n');
                ' '
            }
            '\n' => ' ',
            other => other,
        };
        last = editor.apply(FieldEdit::Insert(ch)).or(last);
    }
    TerminalInput::Ui(last.into_iter().collect())
}

/// Raw mode plus alternate screen for the lifetime of the guard, so the
/// terminal is restored on any return path.
pub struct ScreenGuard;

impl ScreenGuard {
    /// Enter raw mode and the alternate screen; both are undone on drop.
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stderr = io::stderr();
        if let Err(err) = stderr.execute(EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        if let Err(err) = stderr.execute(EnableBracketedPaste) {
            tracing::debug!(error = %err, "bracketed paste unavailable");
        }
        Ok(Self)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let mut stderr = io::stderr();
        let _ = stderr.execute(DisableBracketedPaste);
        let _ = stderr.execute(LeaveAlternateScreen);
        let _ = stderr.execute(cursor::Show);
        let _ = stderr.flush();
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn typed_char_reports_key_press_then_change() {
        let mut editor = FieldEditor::default();
        let input = translate_key(press(KeyCode::Char('1')), &mut editor);
        assert_eq!(
            input,
            TerminalInput::Ui(vec![
                UiEvent::KeyPress(Key::Char('1')),
                UiEvent::Change("1".into())
            ])
        );
    }

    #[test]
    fn enter_is_a_bare_key_press() {
        let mut editor = FieldEditor::default();
        editor.sync("1+1");
        assert_eq!(
            translate_key(press(KeyCode::Enter), &mut editor),
            TerminalInput::Ui(vec![UiEvent::KeyPress(Key::Enter)])
        );
        assert_eq!(editor.value(), "1+1");
    }

    #[test]
    fn cursor_keys_report_no_change() {
        let mut editor = FieldEditor::default();
        editor.sync("ab");
        assert_eq!(
            translate_key(press(KeyCode::Left), &mut editor),
            TerminalInput::Ui(vec![UiEvent::KeyPress(Key::Other)])
        );
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn ctrl_c_quits_and_ctrl_d_only_on_empty_field() {
        let mut editor = FieldEditor::default();
        assert_eq!(translate_key(ctrl('c'), &mut editor), TerminalInput::Quit);
        assert_eq!(translate_key(ctrl('d'), &mut editor), TerminalInput::Quit);

        editor.sync("x");
        assert_eq!(
            translate_key(ctrl('d'), &mut editor),
            TerminalInput::Ui(vec![UiEvent::KeyPress(Key::Other)])
        );
    }

    #[test]
    fn ctrl_u_clears_the_field() {
        let mut editor = FieldEditor::default();
        editor.sync("1+1");
        assert_eq!(
            translate_key(ctrl('u'), &mut editor),
            TerminalInput::Ui(vec![
                UiEvent::KeyPress(Key::Other),
                UiEvent::Change(String::new())
            ])
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let mut editor = FieldEditor::default();
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        assert_eq!(translate_key(key, &mut editor), TerminalInput::Nothing);
        assert_eq!(editor.value(), "");
    }

    #[test]
    fn paste_flattens_newlines_into_one_change() {
        let mut editor = FieldEditor::default();
        assert_eq!(
            paste("a\nb", &mut editor),
            TerminalInput::Ui(vec![UiEvent::Change("a b".into())])
        );
    }

    #[test]
    fn crlf_paste_is_one_break() {
        let mut editor = FieldEditor::default();
        assert_eq!(
            paste("a\r\nb\rc\n\nd", &mut editor),
            TerminalInput::Ui(vec![UiEvent::Change("a b c  d".into())])
        );
    }
}
