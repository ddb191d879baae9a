//! Session runtime.
//!
//! One tokio task per game session owns the [`TurnController`]. User commands,
//! countdown expiry, AI completions and prediction completions all arrive on a
//! single channel and are applied one at a time, so no transition ever
//! interleaves with another and no lock guards the game state.
//!
//! [`Session`] bridges the blocking terminal loop to that task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, timeout, Instant};
use tracing::{info, warn};

use crate::client::{AiClient, DisabledAiClient, HttpAiClient};
use crate::config::SessionConfig;
use crate::core::{
    AiOutcome, Effect, Effects, GameSnapshot, Grid, SavedShape, TurnController,
};
use crate::error::AiError;
use crate::observe::TracingObserver;
use crate::protocol::{BoardReply, BoardRequest};
use crate::types::Cell;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Command from the UI collaborator.
#[derive(Debug)]
pub enum SessionCommand {
    Click(Cell),
    Save,
    /// Start an AI round now instead of waiting for the countdown.
    TriggerAi,
    /// Ask `/predict` what the board looks like.
    Predict,
    Snapshot(oneshot::Sender<GameSnapshot>),
    Shutdown,
}

/// Outbound notification for the UI collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Sent after every processed input.
    Updated(GameSnapshot),
    /// Transient status line.
    Status(String),
    /// A saved shape for the gallery. Ownership passes to the receiver.
    Saved(SavedShape),
    Prediction(String),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub debug_context: Option<String>,
    /// Upper bound on one AI exchange, after which the round is abandoned.
    pub ai_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debug_context: None,
            ai_timeout: Duration::from_millis(crate::config::DEFAULT_AI_TIMEOUT_MS),
        }
    }
}

enum Inbound {
    Command(SessionCommand),
    CountdownElapsed { token: u64 },
    AiFinished {
        round: u64,
        result: Result<BoardReply, AiError>,
    },
    PredictionFinished(Result<String, AiError>),
}

/// The one scheduled countdown of a session.
///
/// Scheduling always aborts the previous timer task first.
#[derive(Default)]
struct Countdown {
    handle: Option<JoinHandle<()>>,
    token: Option<u64>,
    deadline: Option<Instant>,
}

impl Countdown {
    fn schedule(&mut self, token: u64, after: Duration, tx: mpsc::UnboundedSender<Inbound>) {
        self.cancel();
        let deadline = Instant::now() + after;
        self.handle = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            let _ = tx.send(Inbound::CountdownElapsed { token });
        }));
        self.token = Some(token);
        self.deadline = Some(deadline);
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.token = None;
        self.deadline = None;
    }

    /// Forget a timer that has already fired.
    fn fired(&mut self, token: u64) {
        if self.token == Some(token) {
            self.handle = None;
            self.token = None;
            self.deadline = None;
        }
    }

    fn remaining_ms(&self) -> Option<u32> {
        self.deadline.map(|d| {
            let left = d.saturating_duration_since(Instant::now());
            left.as_millis().min(u32::MAX as u128) as u32
        })
    }
}

struct SessionActor {
    controller: TurnController,
    client: Arc<dyn AiClient>,
    options: SessionOptions,
    inbound_tx: mpsc::UnboundedSender<Inbound>,
    events: mpsc::UnboundedSender<SessionEvent>,
    countdown: Countdown,
    prediction_in_flight: bool,
}

impl SessionActor {
    async fn run(mut self, mut inbound_rx: mpsc::UnboundedReceiver<Inbound>) {
        let effects = self.controller.start();
        self.apply(effects);
        self.publish();

        while let Some(msg) = inbound_rx.recv().await {
            let effects = match msg {
                Inbound::Command(SessionCommand::Click(cell)) => self.controller.click(cell),
                Inbound::Command(SessionCommand::Save) => self.controller.save(),
                Inbound::Command(SessionCommand::TriggerAi) => self.controller.trigger_ai(),
                Inbound::Command(SessionCommand::Predict) => {
                    self.start_prediction();
                    Effects::new()
                }
                Inbound::Command(SessionCommand::Snapshot(reply)) => {
                    let _ = reply.send(self.snapshot());
                    continue;
                }
                Inbound::Command(SessionCommand::Shutdown) => break,
                Inbound::CountdownElapsed { token } => {
                    self.countdown.fired(token);
                    self.controller.countdown_elapsed(token)
                }
                Inbound::AiFinished { round, result } => {
                    let outcome = match result {
                        Ok(reply) => AiOutcome::Board {
                            board: reply.board,
                            predict: reply.predict,
                        },
                        Err(e) => {
                            warn!(round, error = %e, "ai exchange failed");
                            AiOutcome::Failed {
                                message: e.user_message(),
                            }
                        }
                    };
                    self.controller.ai_completed(round, outcome)
                }
                Inbound::PredictionFinished(result) => {
                    self.prediction_in_flight = false;
                    match result {
                        Ok(text) => self.emit(SessionEvent::Prediction(text)),
                        Err(e) => {
                            warn!(error = %e, "prediction failed");
                            self.emit(SessionEvent::Status(e.user_message()));
                        }
                    }
                    Effects::new()
                }
            };

            self.apply(effects);
            self.publish();
        }

        self.countdown.cancel();
        info!("session stopped");
    }

    fn apply(&mut self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::ScheduleCountdown { token, after_ms } => {
                    self.countdown.schedule(
                        token,
                        Duration::from_millis(after_ms as u64),
                        self.inbound_tx.clone(),
                    );
                }
                Effect::CancelCountdown => self.countdown.cancel(),
                Effect::RequestAi { round, board } => self.start_ai_round(round, &board),
                Effect::Save(shape) => self.emit(SessionEvent::Saved(shape)),
                Effect::Status(text) => self.emit(SessionEvent::Status(text)),
            }
        }
    }

    fn start_ai_round(&mut self, round: u64, board: &Grid) {
        let mut request = BoardRequest::new(board);
        if let Some(ctx) = self.options.debug_context.clone() {
            request = request.with_debug_context(ctx);
        }

        let client = Arc::clone(&self.client);
        let tx = self.inbound_tx.clone();
        let limit = self.options.ai_timeout;
        tokio::spawn(async move {
            let result = match timeout(limit, client.get_board(&request)).await {
                Ok(result) => result,
                Err(_) => Err(AiError::Timeout),
            };
            let _ = tx.send(Inbound::AiFinished { round, result });
        });
    }

    fn start_prediction(&mut self) {
        if self.prediction_in_flight {
            return;
        }
        self.prediction_in_flight = true;

        let board = self.controller.predict_board();
        let client = Arc::clone(&self.client);
        let tx = self.inbound_tx.clone();
        let limit = self.options.ai_timeout;
        tokio::spawn(async move {
            let result = match timeout(limit, client.predict(&board)).await {
                Ok(result) => result,
                Err(_) => Err(AiError::Timeout),
            };
            let _ = tx.send(Inbound::PredictionFinished(result));
        });
    }

    fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = self.controller.snapshot();
        snapshot.countdown_ms = self.countdown.remaining_ms();
        snapshot
    }

    fn publish(&self) {
        self.emit(SessionEvent::Updated(self.snapshot()));
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

/// Cloneable handle for sending commands to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Inbound>,
}

impl SessionHandle {
    /// Returns false once the session has stopped.
    pub fn send(&self, command: SessionCommand) -> bool {
        self.tx.send(Inbound::Command(command)).is_ok()
    }

    pub fn click(&self, cell: Cell) -> bool {
        self.send(SessionCommand::Click(cell))
    }

    pub async fn snapshot(&self) -> Option<GameSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if !self.send(SessionCommand::Snapshot(reply_tx)) {
            return None;
        }
        reply_rx.await.ok()
    }
}

/// Spawn a session task on the current tokio runtime.
pub fn spawn_session(
    controller: TurnController,
    client: Arc<dyn AiClient>,
    options: SessionOptions,
) -> (
    SessionHandle,
    mpsc::UnboundedReceiver<SessionEvent>,
    JoinHandle<()>,
) {
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<Inbound>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<SessionEvent>();

    let actor = SessionActor {
        controller,
        client,
        options,
        inbound_tx: inbound_tx.clone(),
        events: event_tx,
        countdown: Countdown::default(),
        prediction_in_flight: false,
    };
    let join = tokio::spawn(actor.run(inbound_rx));

    (SessionHandle { tx: inbound_tx }, event_rx, join)
}

/// Running session for a blocking caller.
pub struct Session {
    _rt: Runtime,
    handle: SessionHandle,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl Session {
    /// Start a session from configuration, with tracing wired into the controller.
    pub fn start(config: &SessionConfig) -> anyhow::Result<Self> {
        let rt = Runtime::new()?;
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);

        let client: Arc<dyn AiClient> = if config.ai_enabled() {
            Arc::new(HttpAiClient::new(
                config.ai_url.clone(),
                config.controller.grid_size,
                config.ai_timeout,
            )?)
        } else {
            Arc::new(DisabledAiClient)
        };

        let controller = TurnController::with_observer(
            config.controller.clone(),
            Box::new(TracingObserver::new(id)),
        );
        let options = SessionOptions {
            debug_context: config.debug_context.clone(),
            ai_timeout: config.ai_timeout,
        };

        let (handle, events) = {
            let _guard = rt.enter();
            let (handle, events, _join) = spawn_session(controller, client, options);
            (handle, events)
        };

        info!(
            session = id,
            mode = config.controller.mode.as_str(),
            adjacency = config.controller.adjacency.as_str(),
            policy = config.controller.policy.as_str(),
            ai = config.ai_enabled(),
            "session started"
        );

        Ok(Self {
            _rt: rt,
            handle,
            events,
        })
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn send(&self, command: SessionCommand) -> bool {
        self.handle.send(command)
    }

    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        self.events.try_recv().ok()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.handle.send(SessionCommand::Shutdown);
    }
}
