//! Observability hook for the turn controller.
//!
//! Core logic never logs directly; it reports what happened to an injected
//! [`GameObserver`]. Front-ends decide whether that becomes tracing output,
//! test assertions, or nothing at all.

use std::sync::{Arc, Mutex};

use crate::types::{Cell, TurnOwner};

/// Why a click produced no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    AiTurn,
    OutOfBounds,
    Occupied,
    NotMovable,
    Disconnected,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::AiTurn => "ai_turn",
            IgnoreReason::OutOfBounds => "out_of_bounds",
            IgnoreReason::Occupied => "occupied",
            IgnoreReason::NotMovable => "not_movable",
            IgnoreReason::Disconnected => "disconnected",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    Clicked { cell: Cell, turn: TurnOwner },
    Selected { index: usize, candidates: usize },
    SelectionCleared,
    Moved { index: usize, from: Cell, to: Cell },
    Placed { cell: Cell },
    Ignored { cell: Option<Cell>, reason: IgnoreReason },
    CountdownArmed { token: u64, after_ms: u32 },
    CountdownCancelled,
    AiRoundStarted { round: u64 },
    AiRoundDropped,
    AiRoundFinished { round: u64, added: usize, ok: bool },
    StaleCompletion { round: u64 },
    Saved { tiles: usize, cleared: bool },
}

pub trait GameObserver: Send {
    fn on_event(&self, event: &ObservedEvent);
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {
    fn on_event(&self, _event: &ObservedEvent) {}
}

/// Buffers events for later inspection (tests, replays).
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ObservedEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl GameObserver for RecordingObserver {
    fn on_event(&self, event: &ObservedEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event.clone());
        }
    }
}
