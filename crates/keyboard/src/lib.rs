//! Logical key codes.
//!
//! The editor core never sees raw escape sequences; it works with the
//! [`Key`] values produced here from crossterm key events.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical key delivered to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable ASCII byte or tab
    Char(u8),
    /// Ctrl chord, stored as the lowercase letter
    Ctrl(u8),
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Escape,
}

impl Key {
    /// Numeric key code as seen by a classic raw-mode reader.
    ///
    /// Printables map to their byte, Ctrl chords to the control byte
    /// (`Ctrl-Q` is 17), special keys to 1000 and up.
    pub fn code(self) -> u32 {
        match self {
            Key::Char(c) => u32::from(c),
            Key::Ctrl(c) => u32::from(c & 0x1f),
            Key::Backspace => 127,
            Key::Enter => 13,
            Key::Escape => 27,
            Key::Left => 1000,
            Key::Right => 1001,
            Key::Up => 1002,
            Key::Down => 1003,
            Key::Delete => 1004,
            Key::Home => 1005,
            Key::End => 1006,
            Key::PageUp => 1007,
            Key::PageDown => 1008,
        }
    }

    /// Check if the key appends text in a prompt
    pub fn is_printable(self) -> bool {
        matches!(self, Key::Char(c) if !c.is_ascii_control())
    }
}

/// Source of logical keys (blocking)
pub trait KeySource {
    fn next_key(&mut self) -> Result<Key>;
}

/// Translate a crossterm key event.
///
/// Release/repeat events and non-ASCII characters yield `None`.
pub fn from_key_event(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let key = match event.code {
        KeyCode::Char(ch) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            if !ch.is_ascii_alphabetic() {
                return None;
            }
            Key::Ctrl(ch.to_ascii_lowercase() as u8)
        }
        KeyCode::Char(ch) if ch.is_ascii() && !ch.is_ascii_control() => Key::Char(ch as u8),
        KeyCode::Tab => Key::Char(b'\t'),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_chars() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(from_key_event(key), Some(Key::Char(b'a')));

        let key = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(from_key_event(key), Some(Key::Char(b'A')));

        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(from_key_event(key), Some(Key::Char(b'\t')));
    }

    #[test]
    fn test_non_ascii_dropped() {
        let key = KeyEvent::new(KeyCode::Char('й'), KeyModifiers::NONE);
        assert_eq!(from_key_event(key), None);
    }

    #[test]
    fn test_ctrl_chords() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(from_key_event(key), Some(Key::Ctrl(b'q')));

        let key = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(from_key_event(key), Some(Key::Ctrl(b's')));
    }

    #[test]
    fn test_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(from_key_event(key), None);
    }

    #[test]
    fn test_historical_codes() {
        assert_eq!(Key::Ctrl(b'q').code(), 17);
        assert_eq!(Key::Ctrl(b's').code(), 19);
        assert_eq!(Key::Ctrl(b'f').code(), 6);
        assert_eq!(Key::Ctrl(b'h').code(), 8);
        assert_eq!(Key::Backspace.code(), 127);
        assert_eq!(Key::Enter.code(), u32::from(b'\r'));
        assert_eq!(Key::Escape.code(), 0x1b);
        assert_eq!(Key::PageDown.code(), 1008);
    }

    #[test]
    fn test_is_printable() {
        assert!(Key::Char(b'x').is_printable());
        assert!(!Key::Char(b'\t').is_printable());
        assert!(!Key::Enter.is_printable());
    }
}
