use crate::types::{Cell, GameMode, Tile, TurnOwner};

/// Read-only view of a session handed to the UI collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub grid_size: i32,
    pub tiles: Vec<Tile>,
    pub selected: Option<usize>,
    pub candidates: Vec<Cell>,
    pub turn: TurnOwner,
    /// Time left before the pending AI turn fires (filled in by the session runtime).
    pub countdown_ms: Option<u32>,
    pub status: Option<String>,
}

impl GameSnapshot {
    pub fn tile_at(&self, cell: Cell) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.cell == cell)
    }

    pub fn selected_cell(&self) -> Option<Cell> {
        self.selected
            .and_then(|i| self.tiles.get(i))
            .map(|t| t.cell)
    }

    pub fn is_candidate(&self, cell: Cell) -> bool {
        self.candidates.contains(&cell)
    }

    pub fn accepts_input(&self) -> bool {
        self.turn != TurnOwner::Ai
    }
}
