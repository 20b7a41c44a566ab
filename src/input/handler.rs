use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                KeyAction::Steer(Direction::Up)
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                KeyAction::Steer(Direction::Down)
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                KeyAction::Steer(Direction::Left)
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                KeyAction::Steer(Direction::Right)
            }

            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter | KeyCode::Char(' ') => {
                KeyAction::Restart
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Any button press counts as a click on the restart button
    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> KeyAction {
        match mouse.kind {
            MouseEventKind::Down(_) => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
