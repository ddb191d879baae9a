//! Saved shapes and the in-memory gallery that collects them.

use crate::grid::Grid;
use crate::tiles::TileSet;
use crate::types::{Cell, Player, Tile};

/// A snapshot handed to the save collaborator.
///
/// The single-shape game saves the full grid; the two-agent game saves the
/// owner-tagged tile list so both contributions stay distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub enum SavedShape {
    Grid(Grid),
    Tiles { size: i32, tiles: Vec<Tile> },
}

impl SavedShape {
    pub fn grid(tiles: &TileSet, size: i32) -> Self {
        SavedShape::Grid(Grid::from_cells(tiles.iter().map(|t| t.cell), size))
    }

    pub fn tagged(tiles: &TileSet, size: i32) -> Self {
        SavedShape::Tiles {
            size,
            tiles: tiles.tiles().to_vec(),
        }
    }

    pub fn to_grid(&self) -> Grid {
        match self {
            SavedShape::Grid(g) => g.clone(),
            SavedShape::Tiles { size, tiles } => {
                Grid::from_cells(tiles.iter().map(|t| t.cell), *size)
            }
        }
    }

    /// Text thumbnail, top row first. `#` human or untagged, `o` AI, `.` empty.
    pub fn thumbnail(&self) -> Vec<String> {
        let grid = self.to_grid();
        let size = grid.size();
        let ai_cell = |cell: Cell| match self {
            SavedShape::Tiles { tiles, .. } => tiles
                .iter()
                .any(|t| t.cell == cell && t.owner == Some(Player::Two)),
            SavedShape::Grid(_) => false,
        };

        (0..size)
            .rev()
            .map(|y| {
                (0..size)
                    .map(|x| {
                        let cell = Cell::new(x, y);
                        if !grid.is_occupied(cell) {
                            '.'
                        } else if ai_cell(cell) {
                            'o'
                        } else {
                            '#'
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Receives saved shapes. Must not expect to mutate them after handoff.
pub trait ShapeSink {
    fn save(&mut self, shape: SavedShape);
}

/// Session-lifetime collection of saved shapes.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    shapes: Vec<SavedShape>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[SavedShape] {
        &self.shapes
    }

    pub fn last(&self) -> Option<&SavedShape> {
        self.shapes.last()
    }
}

impl ShapeSink for Gallery {
    fn save(&mut self, shape: SavedShape) {
        self.shapes.push(shape);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_marks_ai_tiles() {
        let mut tiles = TileSet::new();
        tiles.insert(Tile::owned(Cell::new(0, 0), Player::One));
        tiles.insert(Tile::owned(Cell::new(1, 0), Player::Two));
        let saved = SavedShape::tagged(&tiles, 3);
        assert_eq!(saved.thumbnail(), vec!["...", "...", "#o."]);
    }

    #[test]
    fn gallery_collects_in_order() {
        let mut gallery = Gallery::new();
        let tiles = TileSet::centered_line(4);
        gallery.save(SavedShape::grid(&tiles, 4));
        gallery.save(SavedShape::tagged(&tiles, 4));
        assert_eq!(gallery.len(), 2);
        assert!(matches!(gallery.last(), Some(SavedShape::Tiles { .. })));
        assert_eq!(gallery.shapes()[0].to_grid().count(), 4);
    }
}
