//! Terminal Shifting Shapes runner (default binary).
//!
//! Keyboard cursor in, text board out. Game state lives in the session task;
//! this loop only forwards input and draws the latest snapshot.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use shifting_shapes::adapter::{Session, SessionCommand, SessionConfig, SessionEvent};
use shifting_shapes::core::{Gallery, GameSnapshot, ShapeSink};
use shifting_shapes::input::{handle_key_event, should_quit, Cursor, UiAction};
use shifting_shapes::term::{BoardView, StatusLine, TerminalRenderer, ViewExtras};
use shifting_shapes::types::BoardBounds;

const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    init_tracing(config.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// The terminal is in raw mode, so logs only go to a file.
fn init_tracing(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &SessionConfig) -> Result<()> {
    let mut session = Session::start(config)?;
    let mut cursor = Cursor::centered(BoardBounds::new(config.controller.grid_size));
    let mut gallery = Gallery::new();
    let view = BoardView::default();

    let mut latest: Option<(GameSnapshot, Instant)> = None;
    let mut prediction: Option<String> = None;
    let mut status = StatusLine::default();

    loop {
        while let Some(event) = session.try_recv() {
            match event {
                SessionEvent::Updated(snap) => latest = Some((snap, Instant::now())),
                SessionEvent::Status(text) => status.set(text, Instant::now()),
                SessionEvent::Saved(shape) => gallery.save(shape),
                SessionEvent::Prediction(text) => prediction = Some(text),
            }
        }

        if let Some((snap, received)) = &latest {
            let mut snap = snap.clone();
            snap.countdown_ms = snap.countdown_ms.map(|ms| {
                let elapsed = received.elapsed().as_millis().min(u32::MAX as u128) as u32;
                ms.saturating_sub(elapsed)
            });
            // Every status arrives as an event, prediction failures included.
            snap.status = status.current(Instant::now()).map(str::to_string);
            let extras = ViewExtras {
                cursor: Some(cursor.cell()),
                saved_count: gallery.len(),
                last_saved: gallery.last(),
                prediction: prediction.as_deref(),
            };
            term.draw(view.render(&snap, extras))?;
        }

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                if cursor.apply(action) {
                    continue;
                }
                let command = match action {
                    UiAction::Click => SessionCommand::Click(cursor.cell()),
                    UiAction::Save => SessionCommand::Save,
                    UiAction::Predict => SessionCommand::Predict,
                    UiAction::TriggerAi => SessionCommand::TriggerAi,
                    _ => continue,
                };
                if !session.send(command) {
                    anyhow::bail!("session stopped unexpectedly");
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
