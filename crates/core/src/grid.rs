//! Boundary grid - the `size x size` 0/1 matrix exchanged with collaborators
//!
//! Row 0 of a grid is the **highest** `y` on the board: rows are listed top to
//! bottom while board `y` grows upward. Column `c` is board `x = c`.

use crate::types::{BoardBounds, Cell};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: i32,
    rows: Vec<Vec<u8>>,
}

impl Grid {
    /// An empty grid.
    pub fn empty(size: i32) -> Self {
        let n = size.max(0) as usize;
        Self {
            size: size.max(0),
            rows: vec![vec![0u8; n]; n],
        }
    }

    /// Rasterize occupied cells. Cells outside the board are skipped.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I, size: i32) -> Self {
        let mut grid = Self::empty(size);
        let bounds = BoardBounds::new(grid.size);
        for cell in cells {
            if bounds.contains(cell) {
                let row = (grid.size - 1 - cell.y) as usize;
                grid.rows[row][cell.x as usize] = 1;
            }
        }
        grid
    }

    /// Accept a square matrix. Any non-zero value counts as occupied.
    ///
    /// Returns None for an empty or non-square matrix.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Option<Self> {
        let n = rows.len();
        if n == 0 || rows.iter().any(|r| r.len() != n) {
            return None;
        }
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(|v| u8::from(v != 0)).collect())
            .collect();
        Some(Self {
            size: n as i32,
            rows,
        })
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        if !BoardBounds::new(self.size).contains(cell) {
            return false;
        }
        let row = (self.size - 1 - cell.y) as usize;
        self.rows[row][cell.x as usize] != 0
    }

    /// Occupied cells, in row order (top row first, left to right).
    pub fn cells(&self) -> Vec<Cell> {
        let mut out = Vec::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v != 0 {
                    out.push(Cell::new(c as i32, self.size - 1 - r as i32));
                }
            }
        }
        out
    }

    pub fn count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.iter().filter(|&&v| v != 0).count())
            .sum()
    }
}
