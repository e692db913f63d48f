//! Key mapping from terminal events to menu and effect keys.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Esc,
    Up,
    Down,
    Enter,
    /// `0`-`9`.
    Digit(u8),
    /// `q` or Ctrl+C.
    Quit,
    /// Ctrl+Space.
    ToggleLanguage,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize(u16, u16),
}

/// Map a single key event.
pub fn map_key(key: KeyEvent) -> Key {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Key::Esc,
        KeyCode::Up | KeyCode::Left => Key::Up,
        KeyCode::Down | KeyCode::Right => Key::Down,
        KeyCode::Enter => Key::Enter,
        // terminals disagree on what Ctrl+Space sends
        KeyCode::Null => Key::ToggleLanguage,
        KeyCode::Char(' ') | KeyCode::Char('@') if ctrl => Key::ToggleLanguage,
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => Key::Quit,
        KeyCode::Char('k') | KeyCode::Char('K') => Key::Up,
        KeyCode::Char('j') | KeyCode::Char('J') => Key::Down,
        KeyCode::Char('q') | KeyCode::Char('Q') => Key::Quit,
        KeyCode::Char(c) if c.is_ascii_digit() => Key::Digit(c as u8 - b'0'),
        _ => Key::Other,
    }
}

/// Map a terminal event; key releases and unrelated events yield `None`.
pub fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(InputEvent::Key(map_key(key))),
        Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
        _ => None,
    }
}

/// Leaves a running effect and returns to the menu.
pub fn is_escape(key: Key) -> bool {
    key == Key::Esc
}

/// Leaves a standalone effect binary.
pub fn is_exit(key: Key) -> bool {
    matches!(key, Key::Esc | Key::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Key::Up);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Key::Up);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Key::Down);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Key::Down);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('K'))), Key::Up);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('j'))), Key::Down);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Key::Enter);
    }

    #[test]
    fn digits_and_quit() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('1'))), Key::Digit(1));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('0'))), Key::Digit(0));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), Key::Quit);
        assert_eq!(map_key(ctrl('c')), Key::Quit);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('c'))), Key::Other);
    }

    #[test]
    fn ctrl_space_variants_toggle_language() {
        assert_eq!(map_key(ctrl(' ')), Key::ToggleLanguage);
        assert_eq!(map_key(ctrl('@')), Key::ToggleLanguage);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Null)), Key::ToggleLanguage);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Key::Other);
    }

    #[test]
    fn releases_are_dropped() {
        let release = KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_event(Event::Key(release)), None);
        assert_eq!(
            map_event(Event::Key(KeyEvent::from(KeyCode::Esc))),
            Some(InputEvent::Key(Key::Esc))
        );
        assert_eq!(map_event(Event::Resize(80, 24)), Some(InputEvent::Resize(80, 24)));
        assert_eq!(map_event(Event::FocusGained), None);
    }

    #[test]
    fn cancel_predicates() {
        assert!(is_escape(Key::Esc));
        assert!(!is_escape(Key::Quit));
        assert!(is_exit(Key::Quit));
        assert!(is_exit(Key::Esc));
        assert!(!is_exit(Key::Enter));
    }
}
