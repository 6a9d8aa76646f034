//! Keyboard handling
//!
//! Bindings are fixed. Held keys rely on the terminal's own key repeat.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use zonetris::Action;

/// What a key press asks the front-end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the game session
    Game(Action),
    Quit,
}

/// Translate a key press into a command
pub fn command_for(key: KeyEvent) -> Option<Command> {
    // Handle Ctrl+C for quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let command = match normalize_key(key.code) {
        KeyCode::Left | KeyCode::Char('a') => Command::Game(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Command::Game(Action::MoveRight),
        KeyCode::Down | KeyCode::Char('s') => Command::Game(Action::SoftDrop),
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') => Command::Game(Action::Rotate),
        KeyCode::Enter => Command::Game(Action::Reset),
        KeyCode::Esc | KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
