use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Request a turn on the next tick
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
    None,
}

/// Maps terminal key events to game intents
#[derive(Debug, Default, Clone, Copy)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Key releases and repeats carry no new intent
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = direction_for(key.code) {
            return KeyAction::Turn(direction);
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::TogglePause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

/// Arrow keys and WASD, either case
fn direction_for(code: KeyCode) -> Option<Direction> {
    let direction = match code {
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Direction::Up,
            's' => Direction::Down,
            'a' => Direction::Left,
            'd' => Direction::Right,
            _ => return None,
        },
        _ => return None,
    };
    Some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];

        for (code, direction) in cases {
            assert_eq!(
                handler.handle_key_event(press(code)),
                KeyAction::Turn(direction)
            );
        }
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('w'))),
            KeyAction::Turn(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a'))),
            KeyAction::Turn(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('s'))),
            KeyAction::Turn(Direction::Down)
        );

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper),
            KeyAction::Turn(Direction::Right)
        );
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('q'))),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('R'))),
            KeyAction::Restart
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' '))),
            KeyAction::TogglePause
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('x'))),
            KeyAction::None
        );
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_release_ignored() {
        let handler = InputHandler::new();

        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(handler.handle_key_event(release), KeyAction::None);
    }
}
