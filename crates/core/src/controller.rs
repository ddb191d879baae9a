//! Turn controller - the authoritative game state machine
//!
//! The controller owns the tile set and sequences every state change:
//! user clicks, countdown expiry, AI round completion and saves. It performs no
//! I/O and keeps no clock. Instead each call returns [`Effects`] telling the
//! runtime what to do next (arm or cancel a countdown, start an AI request,
//! hand a saved shape to the gallery, show a status line).
//!
//! # States
//!
//! ```text
//! User --commit--> PendingAi --countdown--> Ai --completion--> User
//!                  PendingAi --commit-----> PendingAi (countdown restarts)
//! ```
//!
//! Countdowns are identified by a token. Arming a new countdown supersedes the
//! old token, so a timer that fires late for a superseded token is ignored even
//! if the runtime failed to cancel it. AI rounds carry a round id for the same
//! reason, and only one round can be in flight at a time.

use arrayvec::ArrayVec;

use crate::connectivity::is_connected;
use crate::gallery::SavedShape;
use crate::grid::Grid;
use crate::moves::{legal_moves, shape_adjacency};
use crate::observer::{GameObserver, IgnoreReason, NoopObserver, ObservedEvent};
use crate::snapshot::GameSnapshot;
use crate::tiles::TileSet;
use crate::types::*;

/// Status shown when the AI answers with something that is not a board.
pub const UNEXPECTED_DATA_STATUS: &str = "unexpected data from AI";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub mode: GameMode,
    pub adjacency: Adjacency,
    pub policy: MovePolicy,
    pub grid_size: i32,
    /// When false, commits never arm a countdown and the turn stays with the user.
    pub ai_enabled: bool,
    pub action_countdown_ms: u32,
    /// Countdown armed by [`TurnController::start`]; None waits for the first action.
    pub idle_start_countdown_ms: Option<u32>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Shift,
            adjacency: Adjacency::Four,
            policy: MovePolicy::Perimeter,
            grid_size: GRID_SIZE,
            ai_enabled: true,
            action_countdown_ms: ACTION_COUNTDOWN_MS,
            idle_start_countdown_ms: Some(IDLE_START_COUNTDOWN_MS),
        }
    }
}

impl ControllerConfig {
    pub fn bounds(&self) -> BoardBounds {
        BoardBounds::new(self.grid_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    User,
    PendingAi { token: u64 },
    Ai { round: u64 },
}

impl Turn {
    pub fn owner(&self) -> TurnOwner {
        match self {
            Turn::User => TurnOwner::User,
            Turn::PendingAi { .. } => TurnOwner::PendingAi,
            Turn::Ai { .. } => TurnOwner::Ai,
        }
    }
}

/// Work the runtime must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace any running countdown with one that reports `token` after `after_ms`.
    ScheduleCountdown { token: u64, after_ms: u32 },
    CancelCountdown,
    RequestAi { round: u64, board: Grid },
    Save(SavedShape),
    Status(String),
}

pub type Effects = ArrayVec<Effect, 4>;

/// Result of an AI round as seen by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AiOutcome {
    Board { board: Grid, predict: Vec<String> },
    Failed { message: String },
}

pub struct TurnController {
    config: ControllerConfig,
    tiles: TileSet,
    selected: Option<usize>,
    candidates: Vec<Cell>,
    turn: Turn,
    next_token: u64,
    next_round: u64,
    last_ai_board: Option<Grid>,
    status: Option<String>,
    observer: Box<dyn GameObserver>,
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("config", &self.config)
            .field("tiles", &self.tiles)
            .field("selected", &self.selected)
            .field("turn", &self.turn)
            .finish_non_exhaustive()
    }
}

impl TurnController {
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_observer(config, Box::new(NoopObserver))
    }

    pub fn with_observer(config: ControllerConfig, observer: Box<dyn GameObserver>) -> Self {
        let tiles = match config.mode {
            GameMode::Shift => TileSet::centered_line(config.grid_size),
            GameMode::Build => TileSet::new(),
        };
        Self {
            config,
            tiles,
            selected: None,
            candidates: Vec::new(),
            turn: Turn::User,
            next_token: 0,
            next_round: 0,
            last_ai_board: None,
            status: None,
            observer,
        }
    }

    /// Replace the starting tiles.
    pub fn with_tiles(mut self, tiles: TileSet) -> Self {
        self.tiles = tiles;
        self
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn turn_owner(&self) -> TurnOwner {
        self.turn.owner()
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn candidates(&self) -> &[Cell] {
        &self.candidates
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn ai_in_flight(&self) -> bool {
        matches!(self.turn, Turn::Ai { .. })
    }

    /// Current board as a boundary grid.
    pub fn grid(&self) -> Grid {
        Grid::from_cells(self.tiles.iter().map(|t| t.cell), self.config.grid_size)
    }

    /// Board used for `/predict`: the AI's last returned board, else the current one.
    pub fn predict_board(&self) -> Grid {
        self.last_ai_board.clone().unwrap_or_else(|| self.grid())
    }

    /// Legal destinations for the tile at `index` under the configured rules.
    pub fn legal_moves_for(&self, index: usize) -> Vec<Cell> {
        legal_moves(
            &self.tiles.cells(),
            index,
            self.config.bounds(),
            self.config.adjacency,
            self.config.policy,
        )
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            mode: self.config.mode,
            grid_size: self.config.grid_size,
            tiles: self.tiles.tiles().to_vec(),
            selected: self.selected,
            candidates: self.candidates.clone(),
            turn: self.turn.owner(),
            countdown_ms: None,
            status: self.status.clone(),
        }
    }

    /// Session start: arms the idle countdown when configured.
    pub fn start(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.config.ai_enabled && self.turn == Turn::User {
            if let Some(ms) = self.config.idle_start_countdown_ms {
                self.arm_countdown(ms, &mut effects);
            }
        }
        effects
    }

    /// A click on a board cell.
    pub fn click(&mut self, cell: Cell) -> Effects {
        let mut effects = Effects::new();
        self.emit(ObservedEvent::Clicked {
            cell,
            turn: self.turn.owner(),
        });

        if self.ai_in_flight() {
            self.ignore(Some(cell), IgnoreReason::AiTurn);
            return effects;
        }

        match self.config.mode {
            GameMode::Shift => self.shift_click(cell, &mut effects),
            GameMode::Build => self.build_click(cell, &mut effects),
        }
        effects
    }

    fn shift_click(&mut self, cell: Cell, effects: &mut Effects) {
        // With a selection, any click resolves it: a highlighted cell moves the
        // tile, anything else just drops the selection.
        if let Some(index) = self.selected.take() {
            let candidates = std::mem::take(&mut self.candidates);
            if !candidates.contains(&cell) {
                self.emit(ObservedEvent::SelectionCleared);
                return;
            }
            let Some(from) = self.tiles.get(index).map(|t| t.cell) else {
                self.emit(ObservedEvent::SelectionCleared);
                return;
            };
            if self.tiles.relocate(index, cell) {
                self.emit(ObservedEvent::Moved {
                    index,
                    from,
                    to: cell,
                });
                self.commit(effects);
            }
            return;
        }

        if !self.config.bounds().contains(cell) {
            self.ignore(Some(cell), IgnoreReason::OutOfBounds);
            return;
        }

        let Some(index) = self.tiles.index_of(cell) else {
            return;
        };

        let moves = self.legal_moves_for(index);
        if moves.is_empty() {
            self.ignore(Some(cell), IgnoreReason::NotMovable);
            return;
        }

        self.emit(ObservedEvent::Selected {
            index,
            candidates: moves.len(),
        });
        self.selected = Some(index);
        self.candidates = moves;
    }

    fn build_click(&mut self, cell: Cell, effects: &mut Effects) {
        if !self.config.bounds().contains(cell) {
            self.ignore(Some(cell), IgnoreReason::OutOfBounds);
            return;
        }
        if self.tiles.is_occupied(cell) {
            self.ignore(Some(cell), IgnoreReason::Occupied);
            return;
        }

        // A new tile must touch the existing shape; the empty board accepts anything.
        let touches = self.tiles.is_empty()
            || cell
                .neighbors(self.config.adjacency)
                .any(|n| self.tiles.is_occupied(n));
        if !touches {
            self.ignore(Some(cell), IgnoreReason::Disconnected);
            return;
        }

        self.tiles.insert(Tile::owned(cell, Player::One));
        self.emit(ObservedEvent::Placed { cell });
        self.commit(effects);
    }

    /// Countdown expiry reported by the runtime.
    pub fn countdown_elapsed(&mut self, token: u64) -> Effects {
        let mut effects = Effects::new();
        match self.turn {
            Turn::PendingAi { token: current } if current == token => {
                self.start_round(&mut effects);
            }
            _ => {}
        }
        effects
    }

    /// Start an AI round immediately, skipping any pending countdown.
    pub fn trigger_ai(&mut self) -> Effects {
        let mut effects = Effects::new();
        if !self.config.ai_enabled {
            self.set_status("AI is disabled", &mut effects);
            return effects;
        }
        match self.turn {
            Turn::Ai { .. } => {
                self.emit(ObservedEvent::AiRoundDropped);
            }
            Turn::PendingAi { .. } => {
                effects.push(Effect::CancelCountdown);
                self.emit(ObservedEvent::CountdownCancelled);
                self.start_round(&mut effects);
            }
            Turn::User => self.start_round(&mut effects),
        }
        effects
    }

    /// Apply the result of AI round `round`. Completions for any other round are dropped.
    pub fn ai_completed(&mut self, round: u64, outcome: AiOutcome) -> Effects {
        let mut effects = Effects::new();
        match self.turn {
            Turn::Ai { round: current } if current == round => {}
            _ => {
                self.emit(ObservedEvent::StaleCompletion { round });
                return effects;
            }
        }

        self.turn = Turn::User;

        let (added, ok, status) = match outcome {
            AiOutcome::Board { board, .. } if board.size() != self.config.grid_size => {
                (0, false, UNEXPECTED_DATA_STATUS.to_string())
            }
            AiOutcome::Board { board, predict } => {
                let owner = match self.config.mode {
                    GameMode::Shift => None,
                    GameMode::Build => Some(Player::Two),
                };
                let added = self.tiles.reconcile(&board, owner);
                self.last_ai_board = Some(board);
                let status = if predict.is_empty() {
                    format!("AI added {} tile(s)", added)
                } else {
                    predict.join(", ")
                };
                (added, true, status)
            }
            AiOutcome::Failed { message } => (0, false, message),
        };

        self.emit(ObservedEvent::AiRoundFinished { round, added, ok });
        self.set_status(status, &mut effects);
        effects
    }

    /// Snapshot the board for the gallery. In build mode the board is cleared
    /// for the next round.
    pub fn save(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.ai_in_flight() {
            self.ignore(None, IgnoreReason::AiTurn);
            self.set_status("wait for the AI to finish", &mut effects);
            return effects;
        }

        let size = self.config.grid_size;
        let count = self.tiles.len();
        match self.config.mode {
            GameMode::Shift => {
                effects.push(Effect::Save(SavedShape::grid(&self.tiles, size)));
                self.emit(ObservedEvent::Saved {
                    tiles: count,
                    cleared: false,
                });
            }
            GameMode::Build => {
                effects.push(Effect::Save(SavedShape::tagged(&self.tiles, size)));
                self.tiles.clear();
                self.selected = None;
                self.candidates.clear();
                self.last_ai_board = None;
                if let Turn::PendingAi { .. } = self.turn {
                    effects.push(Effect::CancelCountdown);
                    self.emit(ObservedEvent::CountdownCancelled);
                }
                self.turn = Turn::User;
                self.emit(ObservedEvent::Saved {
                    tiles: count,
                    cleared: true,
                });
            }
        }
        self.set_status("shape saved", &mut effects);
        effects
    }

    /// Check the shape invariant. Direct moves keep shapes 8-connected, so
    /// shift mode under that policy is checked with diagonals.
    pub fn is_shape_connected(&self) -> bool {
        let adjacency = match self.config.mode {
            GameMode::Shift => shape_adjacency(self.config.policy, self.config.adjacency),
            GameMode::Build => self.config.adjacency,
        };
        is_connected(self.tiles.occupancy(), adjacency)
    }

    fn commit(&mut self, effects: &mut Effects) {
        // Status lines are transient: a new move replaces the last message.
        self.status = None;
        if self.config.ai_enabled {
            self.arm_countdown(self.config.action_countdown_ms, effects);
        }
    }

    fn arm_countdown(&mut self, after_ms: u32, effects: &mut Effects) {
        self.next_token += 1;
        let token = self.next_token;
        self.turn = Turn::PendingAi { token };
        self.emit(ObservedEvent::CountdownArmed { token, after_ms });
        effects.push(Effect::ScheduleCountdown { token, after_ms });
    }

    fn start_round(&mut self, effects: &mut Effects) {
        self.next_round += 1;
        let round = self.next_round;
        self.selected = None;
        self.candidates.clear();
        self.turn = Turn::Ai { round };
        self.emit(ObservedEvent::AiRoundStarted { round });
        effects.push(Effect::RequestAi {
            round,
            board: self.grid(),
        });
    }

    fn set_status(&mut self, status: impl Into<String>, effects: &mut Effects) {
        let status = status.into();
        self.status = Some(status.clone());
        effects.push(Effect::Status(status));
    }

    fn ignore(&self, cell: Option<Cell>, reason: IgnoreReason) {
        self.emit(ObservedEvent::Ignored { cell, reason });
    }

    fn emit(&self, event: ObservedEvent) {
        self.observer.on_event(&event);
    }
}
