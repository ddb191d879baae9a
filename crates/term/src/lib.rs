//! Terminal rendering for the board.
//!
//! [`BoardView`] turns a [`GameSnapshot`](crate::core::GameSnapshot) into plain
//! text lines and does no I/O, so it can be unit-tested. [`TerminalRenderer`]
//! owns the real terminal and redraws only when the lines change. [`StatusLine`]
//! keeps status messages on screen for a few seconds only.

pub mod board_view;
pub mod renderer;
pub mod status_line;

pub use shifting_shapes_core as core;
pub use shifting_shapes_types as types;

pub use board_view::{BoardView, ViewExtras};
pub use renderer::TerminalRenderer;
pub use status_line::{StatusLine, STATUS_TTL};
