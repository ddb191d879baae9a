//! BoardView: maps a `GameSnapshot` into text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, SavedShape};
use crate::types::{Cell, Player, TurnOwner};

/// Things the view shows that live outside the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewExtras<'a> {
    pub cursor: Option<Cell>,
    pub saved_count: usize,
    pub last_saved: Option<&'a SavedShape>,
    pub prediction: Option<&'a str>,
}

/// Text renderer for the board and its side information.
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    show_help: bool,
}

impl Default for BoardView {
    fn default() -> Self {
        Self { show_help: true }
    }
}

impl BoardView {
    pub fn new(show_help: bool) -> Self {
        Self { show_help }
    }

    /// Glyph for one cell, ignoring the cursor.
    pub fn glyph(snap: &GameSnapshot, cell: Cell) -> char {
        if snap.selected_cell() == Some(cell) {
            return '@';
        }
        if snap.is_candidate(cell) {
            return '*';
        }
        match snap.tile_at(cell) {
            Some(tile) if tile.owner == Some(Player::Two) => 'o',
            Some(_) => '#',
            None => '.',
        }
    }

    pub fn render(&self, snap: &GameSnapshot, extras: ViewExtras<'_>) -> Vec<String> {
        let size = snap.grid_size.max(0);
        let mut lines = Vec::with_capacity(size as usize + 12);

        lines.push(format!(
            " Shifting Shapes  [{}]  tiles: {}",
            snap.mode.as_str(),
            snap.tiles.len()
        ));
        lines.push(String::new());

        let rule = format!("    +{}+", "-".repeat(size as usize * 3));
        lines.push(rule.clone());
        // Row 0 on screen is the highest y.
        for y in (0..size).rev() {
            let mut row = format!(" {:>2} |", y);
            for x in 0..size {
                let cell = Cell::new(x, y);
                let ch = Self::glyph(snap, cell);
                if extras.cursor == Some(cell) {
                    row.push('[');
                    row.push(ch);
                    row.push(']');
                } else {
                    row.push(' ');
                    row.push(ch);
                    row.push(' ');
                }
            }
            row.push('|');
            lines.push(row);
        }
        lines.push(rule);
        let mut axis = String::from("     ");
        for x in 0..size {
            axis.push_str(&format!("{:^3}", x % 10));
        }
        lines.push(axis);
        lines.push(String::new());

        lines.push(format!(" Turn: {}", turn_line(snap)));
        lines.push(format!(
            " Status: {}",
            snap.status.as_deref().unwrap_or("-")
        ));
        if let Some(prediction) = extras.prediction {
            lines.push(format!(" Prediction: {}", prediction));
        }
        lines.push(format!(" Saved shapes: {}", extras.saved_count));
        if let Some(shape) = extras.last_saved {
            for thumb in shape.thumbnail() {
                lines.push(format!("   {}", thumb));
            }
        }

        if self.show_help {
            lines.push(String::new());
            lines.push(
                " arrows/hjkl move  space click  s save  p predict  a AI now  q quit".to_string(),
            );
        }
        lines
    }
}

fn turn_line(snap: &GameSnapshot) -> String {
    match snap.turn {
        TurnOwner::User => "your move".to_string(),
        TurnOwner::PendingAi => match snap.countdown_ms {
            Some(ms) => format!("AI moves in {:.1}s (keep moving to reset)", ms as f64 / 1000.0),
            None => "AI pending".to_string(),
        },
        TurnOwner::Ai => "AI thinking...".to_string(),
    }
}
