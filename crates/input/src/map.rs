//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Arrows, `hjkl` and `wasd` move; `r` restarts. Letters match either case.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    let direction = match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Direction::Left,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Direction::Right,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Direction::Up,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Direction::Down,
        KeyCode::Char('r') => return Some(GameAction::Restart),
        _ => return None,
    };
    Some(GameAction::Move(direction))
}

/// Like [`handle_key_event`], for any terminal event.
pub fn handle_event(event: &Event) -> Option<GameAction> {
    match event {
        Event::Key(key) => handle_key_event(*key),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
