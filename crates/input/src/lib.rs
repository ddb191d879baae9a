//! Terminal input module (board-facing).
//!
//! This module is independent of any rendering. It maps `crossterm` key events
//! into [`UiAction`]s and keeps a board [`Cursor`], which is how a keyboard
//! produces the "cell click" events the turn controller consumes.

pub mod cursor;
pub mod map;

pub use shifting_shapes_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit, UiAction};
