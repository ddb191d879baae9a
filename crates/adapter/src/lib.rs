//! Adapter module - AI opponent over HTTP with a JSON protocol
//!
//! This crate connects a [`TurnController`](crate::core::TurnController) to an
//! external AI service and to wall-clock time. The core state machine never
//! sleeps or does I/O; it returns effects, and the session runtime here carries
//! them out.
//!
//! # Protocol Overview
//!
//! The AI service exposes two endpoints, both `POST` with a JSON body:
//!
//! 1. **`/getBoard`**: body `{board: number[][]}` (optionally `debug` and `context`).
//!    The reply is either a bare grid or `{board, predict}` where `predict` is a
//!    string or a list of strings. The JSON may be wrapped in prose or a fenced
//!    code block.
//! 2. **`/predict`**: body is the bare grid. The reply text is shown verbatim.
//!
//! Grids are square 0/1 matrices. Row 0 holds the highest `y` coordinate.
//!
//! Non-success responses may carry `{details}`, which is surfaced in the status line.
//!
//! # Example Exchange
//!
//! ```text
//! Client -> AI: {"board":[[0,0,0],[1,1,1],[0,0,0]]}
//! AI -> Client: ```json {"board":[[0,0,0],[1,1,1],[0,1,0]],"predict":"line"} ```
//! ```
//!
//! # Environment Variables
//!
//! - `SHAPES_AI_URL`: AI base URL (default: "http://localhost:3000")
//! - `SHAPES_AI_DISABLED`: Set to "1" or "true" to play without AI turns
//! - `SHAPES_AI_TIMEOUT_MS`: per-exchange timeout (default: 15000)
//! - `SHAPES_AI_DEBUG_CONTEXT`: extra context string sent with `debug: 1`
//!
//! See [`config::SessionConfig`] for the full list.
//!
//! # Implementation
//!
//! - Uses **tokio** for the session task and countdown timers
//! - Uses **reqwest** for HTTP and **serde_json** for payloads
//! - AI failures never end a session; they become a status line

pub mod client;
pub mod config;
pub mod error;
pub mod observe;
pub mod protocol;
pub mod runtime;

pub use shifting_shapes_core as core;
pub use shifting_shapes_types as types;

pub use client::{AiClient, DisabledAiClient, HttpAiClient};
pub use config::{SessionConfig, DEFAULT_AI_TIMEOUT_MS, DEFAULT_AI_URL};
pub use error::AiError;
pub use observe::TracingObserver;
pub use protocol::{extract_json, parse_board_reply, parse_prediction, BoardReply, BoardRequest};
pub use runtime::{spawn_session, Session, SessionCommand, SessionEvent, SessionHandle, SessionOptions};
