//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the shape-integrity rules and the turn state machine.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same inputs produce identical states and effects
//! - **Testable**: Every transition is a plain method call returning its effects
//! - **Portable**: Runs under the terminal front-end, a tokio actor, or headless
//!
//! # Module Structure
//!
//! - [`connectivity`]: flood-fill check that a cell set is one connected shape
//! - [`moves`]: legal destinations for a single tile under a move policy
//! - [`tiles`]: ordered tile sequence with set-like occupancy
//! - [`grid`]: boundary 0/1 matrix with the top-row-is-highest-y convention
//! - [`controller`]: the User / PendingAi / Ai turn state machine
//! - [`gallery`]: saved shapes and their in-memory collection
//! - [`observer`]: injectable observability hook
//!
//! # Example
//!
//! ```
//! use shifting_shapes_core::{ControllerConfig, TurnController};
//! use shifting_shapes_core::types::{Cell, TurnOwner};
//!
//! let mut game = TurnController::new(ControllerConfig::default());
//!
//! // Select the left end of the opening line, then move it up.
//! game.click(Cell::new(0, 5));
//! assert!(game.candidates().contains(&Cell::new(1, 6)));
//! game.click(Cell::new(1, 6));
//!
//! // The move hands the turn to a pending AI countdown.
//! assert_eq!(game.turn_owner(), TurnOwner::PendingAi);
//! assert!(game.is_shape_connected());
//! ```

pub mod connectivity;
pub mod controller;
pub mod gallery;
pub mod grid;
pub mod moves;
pub mod observer;
pub mod snapshot;
pub mod tiles;

pub use shifting_shapes_types as types;

// Re-export commonly used types for convenience
pub use connectivity::{is_connected, is_connected_slice, reachable_from};
pub use controller::{
    AiOutcome, ControllerConfig, Effect, Effects, Turn, TurnController, UNEXPECTED_DATA_STATUS,
};
pub use gallery::{Gallery, SavedShape, ShapeSink};
pub use grid::Grid;
pub use moves::{is_perimeter_tile, legal_moves, shape_adjacency};
pub use observer::{GameObserver, IgnoreReason, NoopObserver, ObservedEvent, RecordingObserver};
pub use snapshot::GameSnapshot;
pub use tiles::TileSet;
