//! Tracing-backed observer for the turn controller.

use tracing::{debug, info, warn};

use crate::core::{GameObserver, ObservedEvent};

/// Forwards controller events to `tracing`, tagged with a session id.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    session: u64,
}

impl TracingObserver {
    pub fn new(session: u64) -> Self {
        Self { session }
    }
}

impl GameObserver for TracingObserver {
    fn on_event(&self, event: &ObservedEvent) {
        let session = self.session;
        match event {
            ObservedEvent::Clicked { cell, turn } => {
                debug!(session, x = cell.x, y = cell.y, turn = turn.as_str(), "cell clicked");
            }
            ObservedEvent::Selected { index, candidates } => {
                debug!(session, index, candidates, "tile selected");
            }
            ObservedEvent::SelectionCleared => debug!(session, "selection cleared"),
            ObservedEvent::Moved { index, from, to } => {
                info!(
                    session,
                    index,
                    from_x = from.x,
                    from_y = from.y,
                    to_x = to.x,
                    to_y = to.y,
                    "tile moved"
                );
            }
            ObservedEvent::Placed { cell } => {
                info!(session, x = cell.x, y = cell.y, "tile placed");
            }
            ObservedEvent::Ignored { cell, reason } => {
                debug!(
                    session,
                    x = cell.map(|c| c.x),
                    y = cell.map(|c| c.y),
                    reason = reason.as_str(),
                    "input ignored"
                );
            }
            ObservedEvent::CountdownArmed { token, after_ms } => {
                debug!(session, token, after_ms, "countdown armed");
            }
            ObservedEvent::CountdownCancelled => debug!(session, "countdown cancelled"),
            ObservedEvent::AiRoundStarted { round } => info!(session, round, "ai round started"),
            ObservedEvent::AiRoundDropped => {
                warn!(session, "ai trigger dropped: a round is already in flight")
            }
            ObservedEvent::AiRoundFinished { round, added, ok } => {
                if *ok {
                    info!(session, round, added, "ai round applied");
                } else {
                    warn!(session, round, "ai round failed");
                }
            }
            ObservedEvent::StaleCompletion { round } => {
                warn!(session, round, "stale ai completion dropped");
            }
            ObservedEvent::Saved { tiles, cleared } => {
                info!(session, tiles, cleared, "shape saved");
            }
        }
    }
}
