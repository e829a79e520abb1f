//! Platform-independent key events, and translation from terminal events.

/// A key as seen by the editing core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character (Tab arrives as `'\t'`)
    Char(char),
    Escape,
    Enter,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    /// Ctrl+S
    Save,
    /// Ctrl+Q or Ctrl+C
    Quit,
}

#[cfg(feature = "runtime")]
pub use translate::translate_key;

#[cfg(feature = "runtime")]
mod translate {
    use super::Key;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    /// Map a terminal key event to a [`Key`]; `None` for keys the editor ignores.
    pub fn translate_key(event: &KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('s' | 'S') => Some(Key::Save),
                KeyCode::Char('q' | 'Q' | 'c' | 'C') => Some(Key::Quit),
                _ => None,
            };
        }
        if event.modifiers.contains(KeyModifiers::ALT) {
            return None;
        }

        let key = match event.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Tab => Key::Char('\t'),
            KeyCode::Esc => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => return None,
        };
        Some(key)
    }

}
