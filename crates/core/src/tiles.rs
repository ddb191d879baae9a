//! Tile set - ordered tiles with set-like occupancy
//!
//! Tiles keep insertion order (selection is index-addressed) while an occupancy
//! index guarantees no two tiles share a cell.

use std::collections::HashSet;

use crate::grid::Grid;
use crate::types::{Cell, Player, Tile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileSet {
    tiles: Vec<Tile>,
    occupied: HashSet<Cell>,
}

impl TileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from unowned cells; duplicates after the first are dropped.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        let mut set = Self::new();
        for cell in cells {
            set.insert(Tile::new(cell));
        }
        set
    }

    /// The opening shape of the single-shape game: a full-width horizontal
    /// line through the middle row.
    pub fn centered_line(grid_size: i32) -> Self {
        let y = grid_size / 2;
        Self::from_cells((0..grid_size).map(|x| Cell::new(x, y)))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Cells in tile order.
    pub fn cells(&self) -> Vec<Cell> {
        self.tiles.iter().map(|t| t.cell).collect()
    }

    pub fn occupancy(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.occupied.contains(&cell) {
            return None;
        }
        self.tiles.iter().position(|t| t.cell == cell)
    }

    /// Append a tile. Returns false if its cell is already taken.
    pub fn insert(&mut self, tile: Tile) -> bool {
        if !self.occupied.insert(tile.cell) {
            return false;
        }
        self.tiles.push(tile);
        true
    }

    /// Move the tile at `index` to `to`, keeping its owner and position in order.
    /// Returns false if the index is invalid or `to` is occupied.
    pub fn relocate(&mut self, index: usize, to: Cell) -> bool {
        if self.occupied.contains(&to) {
            return false;
        }
        let Some(tile) = self.tiles.get_mut(index) else {
            return false;
        };
        self.occupied.remove(&tile.cell);
        self.occupied.insert(to);
        tile.cell = to;
        true
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.occupied.clear();
    }

    /// Replace contents with the occupancy of `grid`, treated as trusted board state.
    ///
    /// Tiles still present keep their owner and order, tiles whose cell is now
    /// empty are dropped, and new cells are appended tagged with `new_owner`.
    /// Returns the number of tiles added.
    pub fn reconcile(&mut self, grid: &Grid, new_owner: Option<Player>) -> usize {
        let incoming: HashSet<Cell> = grid.cells().into_iter().collect();

        self.tiles.retain(|t| incoming.contains(&t.cell));
        self.occupied.retain(|c| incoming.contains(c));

        // Grid cells come back in row order; sort for a stable append order.
        let mut fresh: Vec<Cell> = incoming
            .into_iter()
            .filter(|c| !self.occupied.contains(c))
            .collect();
        fresh.sort();

        let added = fresh.len();
        for cell in fresh {
            self.insert(Tile {
                cell,
                owner: new_owner,
            });
        }
        added
    }
}
