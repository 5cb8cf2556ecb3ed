//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Action;

/// Map one key press to an action.
///
/// Control chords take precedence over the plain letter, so Ctrl+W saves
/// while `w` rotates.
pub fn map_key(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => Action::Pause,
            KeyCode::Char('w') | KeyCode::Char('W') => Action::Save,
            KeyCode::Char('r') | KeyCode::Char('R') => Action::Load,
            KeyCode::Char('n') | KeyCode::Char('N') => Action::NewGame,
            KeyCode::Char('c') | KeyCode::Char('C') => Action::Quit,
            _ => Action::Unrecognized,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Action::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Action::Right,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Action::Down,

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Action::Rotate,

        // Drop
        KeyCode::Char(' ') | KeyCode::Enter => Action::FastDown,

        _ => Action::Unrecognized,
    }
}

/// Map a key event, ignoring repeats and releases.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    match key.kind {
        KeyEventKind::Press => Some(map_key(key)),
        KeyEventKind::Repeat | KeyEventKind::Release => None,
    }
}

/// Collapse every key buffered during one wait window into a single action.
///
/// The most recent recognized action wins; older ones are dropped, not
/// queued. Only when nothing recognizable arrived does an unrecognized key
/// count, and an empty window yields [`Action::Empty`].
pub fn latest_action(keys: impl IntoIterator<Item = KeyEvent>) -> Action {
    let mut latest = Action::Empty;
    for action in keys.into_iter().filter_map(handle_key_event) {
        if action != Action::Unrecognized || latest.is_empty() {
            latest = action;
        }
    }
    latest
}
