//! Keyboard cursor over the board.

use crate::map::UiAction;
use crate::types::{BoardBounds, Cell};

/// A board position steered by arrow keys. Always inside the bounds it was
/// created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    cell: Cell,
    bounds: BoardBounds,
}

impl Cursor {
    /// Start at the middle of the board, where the opening line sits.
    pub fn centered(bounds: BoardBounds) -> Self {
        let mid = bounds.size / 2;
        Self {
            cell: Cell::new(mid, mid),
            bounds,
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Move by one cell, clamping at the edges.
    pub fn step(&mut self, dx: i32, dy: i32) {
        let max = (self.bounds.size - 1).max(0);
        self.cell = Cell::new(
            (self.cell.x + dx).clamp(0, max),
            (self.cell.y + dy).clamp(0, max),
        );
    }

    /// Apply a cursor action. Returns false for actions that are not cursor moves.
    ///
    /// Up increases `y`: row 0 on screen is the highest `y`.
    pub fn apply(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::CursorLeft => self.step(-1, 0),
            UiAction::CursorRight => self.step(1, 0),
            UiAction::CursorUp => self.step(0, 1),
            UiAction::CursorDown => self.step(0, -1),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_centered() {
        let cursor = Cursor::centered(BoardBounds { size: 10 });
        assert_eq!(cursor.cell(), Cell::new(5, 5));
    }

    #[test]
    fn clamps_at_edges() {
        let mut cursor = Cursor::centered(BoardBounds { size: 3 });
        for _ in 0..5 {
            cursor.apply(UiAction::CursorLeft);
            cursor.apply(UiAction::CursorUp);
        }
        assert_eq!(cursor.cell(), Cell::new(0, 2));

        for _ in 0..5 {
            cursor.apply(UiAction::CursorRight);
            cursor.apply(UiAction::CursorDown);
        }
        assert_eq!(cursor.cell(), Cell::new(2, 0));
    }

    #[test]
    fn non_cursor_actions_are_rejected() {
        let mut cursor = Cursor::centered(BoardBounds { size: 10 });
        assert!(!cursor.apply(UiAction::Click));
        assert_eq!(cursor.cell(), Cell::new(5, 5));
    }
}
