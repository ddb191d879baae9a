//! Key mapping from terminal events to UI actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    /// Click the cell under the cursor.
    Click,
    Save,
    Predict,
    /// Start the AI turn without waiting for the countdown.
    TriggerAi,
}

/// Map keyboard input to UI actions.
pub fn handle_key_event(key: KeyEvent) -> Option<UiAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(UiAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(UiAction::CursorRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(UiAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(UiAction::CursorDown),

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => Some(UiAction::Click),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(UiAction::Save),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(UiAction::Predict),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(UiAction::TriggerAi),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
