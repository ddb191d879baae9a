//! Protocol module - JSON message types for the AI service
//!
//! Two endpoints are used:
//!
//! - `POST /getBoard` with `{"board": grid}` (plus `{"debug": 1, "context": ...}`
//!   when debugging). The reply is either a bare grid (legacy) or
//!   `{"board": grid, "predict": string | string[]}`.
//! - `POST /predict` with a bare grid. The reply is shown verbatim.
//!
//! Replies may arrive wrapped in a fenced code block or surrounded by prose,
//! so the first JSON object (or fenced block) is cut out before parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Grid;
use crate::error::AiError;

/// Body of `POST /getBoard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardRequest {
    pub board: Vec<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl BoardRequest {
    pub fn new(grid: &Grid) -> Self {
        Self {
            board: grid.rows().to_vec(),
            debug: None,
            context: None,
        }
    }

    /// Ask the service for debug output, passing `context` along.
    pub fn with_debug_context(mut self, context: impl Into<String>) -> Self {
        self.debug = Some(1);
        self.context = Some(context.into());
        self
    }
}

/// A parsed `/getBoard` reply.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardReply {
    pub board: Grid,
    /// Empty for legacy replies.
    pub predict: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoardPayload {
    Legacy(Vec<Vec<u8>>),
    Tagged {
        board: Vec<Vec<u8>>,
        #[serde(default)]
        predict: Option<PredictField>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictField {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    details: Option<Value>,
}

/// Cut the JSON payload out of a response body.
///
/// A fenced block wins when it opens before the first JSON opener. Otherwise
/// the span from the first `{` to the last `}` is used if it parses, and the
/// span from the first `[` to the last `]` (a bare grid) if it does not.
pub fn extract_json(body: &str) -> Option<&str> {
    let fence = body.find("```");
    let opener = body.find('{').or_else(|| body.find('['));
    if let Some(f) = fence {
        if opener.map_or(true, |o| f < o) {
            return json_span(fenced_body(&body[f + 3..]));
        }
    }
    json_span(body)
}

fn is_opener(c: char) -> bool {
    c == '{' || c == '['
}

fn fenced_body(rest: &str) -> &str {
    // Skip an info string such as `json` on the opening fence line.
    let start = match rest.find('\n') {
        Some(nl) if !rest[..nl].contains(is_opener) => nl + 1,
        _ => 0,
    };
    let inner = &rest[start..];
    match inner.find("```") {
        Some(end) => &inner[..end],
        None => inner,
    }
}

fn json_span(text: &str) -> Option<&str> {
    let object = delimited(text, '{', '}');
    if let Some(obj) = object {
        if serde_json::from_str::<Value>(obj).is_ok() {
            return Some(obj);
        }
    }
    // Broken objects are still returned so the caller reports the JSON error.
    delimited(text, '[', ']').or(object)
}

fn delimited(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse a `/getBoard` reply and check it against the board size.
pub fn parse_board_reply(body: &str, grid_size: i32) -> Result<BoardReply, AiError> {
    let json = extract_json(body).ok_or(AiError::NoJson)?;
    let value: Value = serde_json::from_str(json)?;
    let payload: BoardPayload = serde_json::from_value(value)
        .map_err(|_| AiError::Malformed("expected a board grid".to_string()))?;

    let (rows, predict) = match payload {
        BoardPayload::Legacy(rows) => (rows, Vec::new()),
        BoardPayload::Tagged { board, predict } => {
            let predict = match predict {
                None => Vec::new(),
                Some(PredictField::One(s)) => vec![s],
                Some(PredictField::Many(v)) => v,
            };
            (board, predict)
        }
    };

    let board = Grid::from_rows(rows)
        .ok_or_else(|| AiError::Malformed("board is not a square grid".to_string()))?;
    if board.size() != grid_size {
        return Err(AiError::Malformed(format!(
            "board is {}x{}, expected {}x{}",
            board.size(),
            board.size(),
            grid_size,
            grid_size
        )));
    }

    Ok(BoardReply { board, predict })
}

/// Render a `/predict` reply for display: JSON strings unquoted, other JSON
/// compact, anything else as trimmed text.
pub fn parse_prediction(body: &str) -> String {
    let parsed = extract_json(body).and_then(|j| serde_json::from_str::<Value>(j).ok());
    match parsed {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => match serde_json::from_str::<Value>(body.trim()) {
            Ok(Value::String(s)) => s,
            _ => body.trim().to_string(),
        },
    }
}

/// Build the error for a non-2xx reply, lifting `details` out of a JSON body.
pub fn status_error(status: u16, body: &str) -> AiError {
    let details = extract_json(body)
        .and_then(|j| serde_json::from_str::<ErrorBody>(j).ok())
        .and_then(|b| b.details)
        .map(|d| match d {
            Value::String(s) => s,
            other => other.to_string(),
        });
    AiError::Status { status, details }
}
