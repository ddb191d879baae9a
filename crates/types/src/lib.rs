//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal front-end, AI wire protocol).
//!
//! # Board Coordinates
//!
//! The board is a square of side [`GRID_SIZE`] cells:
//!
//! - **x**: columns, 0 at the left edge, growing to the right
//! - **y**: rows, 0 at the bottom edge, growing **upward**
//!
//! Grids exchanged with the AI service are sent top-to-bottom, so row 0 of a
//! transmitted grid is the highest `y`. The conversion lives in the core crate.
//!
//! # Turn Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ACTION_COUNTDOWN_MS` | 2000 | Quiet period after a user action before the AI plays |
//! | `IDLE_START_COUNTDOWN_MS` | 5000 | Countdown armed at session start with no action |
//!
//! # Examples
//!
//! ```
//! use shifting_shapes_types::{Adjacency, Cell, MovePolicy, GRID_SIZE};
//!
//! let cell = Cell::new(0, 5);
//! let neighbors: Vec<Cell> = cell.neighbors(Adjacency::Four).collect();
//! assert_eq!(neighbors.len(), 4);
//!
//! assert_eq!(Adjacency::from_str("8"), Some(Adjacency::Eight));
//! assert_eq!(MovePolicy::from_str("direct"), Some(MovePolicy::Direct));
//! assert_eq!(GRID_SIZE, 10);
//! ```

/// Board side length in cells (10x10)
pub const GRID_SIZE: i32 = 10;

/// Largest configurable board side. Grids are sent whole on every AI exchange.
pub const MAX_GRID_SIZE: i32 = 64;

/// Countdown restarted by every committed user action (2 seconds).
pub const ACTION_COUNTDOWN_MS: u32 = 2000;

/// Countdown armed at session start when nobody has acted yet (5 seconds).
pub const IDLE_START_COUNTDOWN_MS: u32 = 5000;

/// Orthogonal neighbor offsets.
pub const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Orthogonal plus diagonal neighbor offsets.
pub const ALL_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// A board-relative coordinate.
///
/// Ordering is lexicographic on `(x, y)`, which is the order move lists are
/// reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this cell by `(dx, dy)`, or None if a coordinate would overflow.
    pub const fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Iterate over the neighbors of this cell under the given adjacency rule.
    ///
    /// Neighbors may fall outside the board; callers filter with [`BoardBounds`].
    /// Offsets past the `i32` range are skipped.
    pub fn neighbors(self, adjacency: Adjacency) -> impl Iterator<Item = Cell> {
        adjacency
            .offsets()
            .iter()
            .filter_map(move |&(dx, dy)| self.checked_offset(dx, dy))
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Which coordinate offsets count as neighboring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Adjacency {
    /// Orthogonal only: `(±1,0)`, `(0,±1)`.
    #[default]
    Four,
    /// Orthogonal plus diagonal: adds `(±1,±1)`.
    Eight,
}

impl Adjacency {
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            Adjacency::Four => &ORTHOGONAL_OFFSETS,
            Adjacency::Eight => &ALL_OFFSETS,
        }
    }

    /// Parse from a config value (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "4" | "four" | "orthogonal" => Some(Adjacency::Four),
            "8" | "eight" | "diagonal" => Some(Adjacency::Eight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Adjacency::Four => "4",
            Adjacency::Eight => "8",
        }
    }
}

/// How destination candidates for a moving tile are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovePolicy {
    /// Any empty in-bounds cell orthogonally touching the rest of the shape.
    #[default]
    Perimeter,
    /// The moving tile's own orthogonal neighbors, each rechecked against the
    /// full relocated shape under 8-connectivity.
    Direct,
}

impl MovePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "perimeter" => Some(MovePolicy::Perimeter),
            "direct" => Some(MovePolicy::Direct),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovePolicy::Perimeter => "perimeter",
            MovePolicy::Direct => "direct",
        }
    }
}

/// Game variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// One fixed shape; the user relocates perimeter tiles.
    #[default]
    Shift,
    /// The user and the AI take turns adding tiles; saving clears the board.
    Build,
}

impl GameMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "shift" => Some(GameMode::Shift),
            "build" => Some(GameMode::Build),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Shift => "shift",
            GameMode::Build => "build",
        }
    }
}

/// Owner tag carried by tiles in the two-agent variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The human.
    One,
    /// The AI.
    Two,
}

impl Player {
    pub fn as_u8(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

/// An occupied cell plus its optional owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub cell: Cell,
    pub owner: Option<Player>,
}

impl Tile {
    pub const fn new(cell: Cell) -> Self {
        Self { cell, owner: None }
    }

    pub const fn owned(cell: Cell, owner: Player) -> Self {
        Self {
            cell,
            owner: Some(owner),
        }
    }
}

/// Whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnOwner {
    /// Accepting input.
    User,
    /// A countdown is running toward an automatic AI turn.
    PendingAi,
    /// An AI round is in flight.
    Ai,
}

impl TurnOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnOwner::User => "user",
            TurnOwner::PendingAi => "pending_ai",
            TurnOwner::Ai => "ai",
        }
    }
}

/// A fixed square board `[0, size)²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardBounds {
    pub size: i32,
}

impl BoardBounds {
    pub const fn new(size: i32) -> Self {
        Self { size }
    }

    #[inline(always)]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.size && cell.y < self.size
    }
}

impl Default for BoardBounds {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}
