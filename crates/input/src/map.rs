//! Key mapping from terminal events to game actions.

use crate::types::{Action, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map one raw control byte to an action.
pub fn map_byte(b: u8) -> Option<Action> {
    Action::from_byte(b)
}

/// Map keyboard input to game actions.
///
/// Raw mode swallows the interrupt key, so Ctrl-C is mapped to quit here.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Left => Some(Action::Move(Direction::Left)),
        KeyCode::Right => Some(Action::Move(Direction::Right)),
        KeyCode::Char(c) if c.is_ascii() => map_byte(c as u8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('a'))),
            Some(Action::Move(Direction::Left))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('s'))),
            Some(Action::Move(Direction::Right))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some(Action::Move(Direction::Left))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('z'))),
            Some(Action::Jump(Direction::Left))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('x'))),
            Some(Action::Jump(Direction::Right))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(Action::Fire));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_quit_on_ctrl_c() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('A'))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('é'))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), None);
        assert_eq!(map_byte(0x1b), None);
    }
}
