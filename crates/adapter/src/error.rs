use thiserror::Error;

use crate::core::UNEXPECTED_DATA_STATUS;

/// Failure of a single exchange with the AI service.
///
/// None of these are fatal to a session: the round is abandoned, the user gets
/// a status line, and the board stays as it was.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AI error {status}{}", detail_suffix(.details))]
    Status {
        status: u16,
        details: Option<String>,
    },

    #[error("AI request timed out")]
    Timeout,

    #[error("no JSON found in AI response")]
    NoJson,

    #[error("invalid JSON from AI: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected data from AI: {0}")]
    Malformed(String),
}

fn detail_suffix(details: &Option<String>) -> String {
    match details {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

impl AiError {
    /// Payload problems, as opposed to transport or HTTP status failures.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, AiError::NoJson | AiError::Json(_) | AiError::Malformed(_))
    }

    /// Short text for the transient status line.
    pub fn user_message(&self) -> String {
        match self {
            AiError::Timeout => "AI request timed out".to_string(),
            AiError::Transport(e) if e.is_timeout() => "AI request timed out".to_string(),
            AiError::Transport(_) => "AI request failed".to_string(),
            AiError::Status { .. } => self.to_string(),
            _ => UNEXPECTED_DATA_STATUS.to_string(),
        }
    }
}
