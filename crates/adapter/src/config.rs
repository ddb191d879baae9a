//! Session configuration from environment variables.

use std::time::Duration;

use crate::core::ControllerConfig;
use crate::types::{Adjacency, GameMode, MovePolicy, MAX_GRID_SIZE};

pub const DEFAULT_AI_URL: &str = "http://localhost:3000";
pub const DEFAULT_AI_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub ai_url: String,
    pub ai_timeout: Duration,
    /// Sent as `{debug: 1, context}` on every `/getBoard` request when set.
    pub debug_context: Option<String>,
    pub log_path: Option<String>,
    pub controller: ControllerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ai_url: DEFAULT_AI_URL.to_string(),
            ai_timeout: Duration::from_millis(DEFAULT_AI_TIMEOUT_MS),
            debug_context: None,
            log_path: None,
            controller: ControllerConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables. Missing or unparsable values fall
    /// back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let ai_url = non_empty("SHAPES_AI_URL").unwrap_or(defaults.ai_url);
        let ai_timeout = non_empty("SHAPES_AI_TIMEOUT_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.ai_timeout);

        let ai_disabled = non_empty("SHAPES_AI_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let mut controller = defaults.controller;
        controller.ai_enabled = !ai_disabled;
        if let Some(mode) = non_empty("SHAPES_MODE").and_then(|s| GameMode::from_str(&s)) {
            controller.mode = mode;
        }
        if let Some(adj) = non_empty("SHAPES_ADJACENCY").and_then(|s| Adjacency::from_str(&s)) {
            controller.adjacency = adj;
        }
        if let Some(policy) = non_empty("SHAPES_MOVE_POLICY").and_then(|s| MovePolicy::from_str(&s)) {
            controller.policy = policy;
        }
        if let Some(size) = non_empty("SHAPES_GRID_SIZE")
            .and_then(|s| s.parse::<i32>().ok())
            .filter(|&n| n > 0 && n <= MAX_GRID_SIZE)
        {
            controller.grid_size = size;
        }

        Self {
            ai_url,
            ai_timeout,
            debug_context: non_empty("SHAPES_AI_DEBUG_CONTEXT"),
            log_path: non_empty("SHAPES_LOG_PATH"),
            controller,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.controller.ai_enabled
    }
}
