//! AI service client.
//!
//! The session runtime only depends on the [`AiClient`] trait; [`HttpAiClient`]
//! is the production implementation over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::core::Grid;
use crate::error::AiError;
use crate::protocol::{parse_board_reply, parse_prediction, status_error, BoardReply, BoardRequest};

#[async_trait]
pub trait AiClient: Send + Sync {
    /// `POST /getBoard`: send the board, receive the AI's board.
    async fn get_board(&self, request: &BoardRequest) -> Result<BoardReply, AiError>;

    /// `POST /predict`: ask what the board looks like. Returned text is shown verbatim.
    async fn predict(&self, board: &Grid) -> Result<String, AiError>;
}

/// Client used when AI play is switched off. Every call fails without touching
/// the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAiClient;

#[async_trait]
impl AiClient for DisabledAiClient {
    async fn get_board(&self, _request: &BoardRequest) -> Result<BoardReply, AiError> {
        Err(AiError::Status {
            status: 503,
            details: Some("AI is disabled".to_string()),
        })
    }

    async fn predict(&self, _board: &Grid) -> Result<String, AiError> {
        Err(AiError::Status {
            status: 503,
            details: Some("AI is disabled".to_string()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct HttpAiClient {
    http: Client,
    base_url: String,
    grid_size: i32,
}

impl HttpAiClient {
    pub fn new(base_url: impl Into<String>, grid_size: i32, timeout: Duration) -> Result<Self, AiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            grid_size,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_text<B: serde::Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, AiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, status = status.as_u16(), bytes = text.len(), "ai response");

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }
        Ok(text)
    }
}

#[async_trait]
impl AiClient for HttpAiClient {
    async fn get_board(&self, request: &BoardRequest) -> Result<BoardReply, AiError> {
        let text = self.post_text("/getBoard", request).await?;
        parse_board_reply(&text, self.grid_size)
    }

    async fn predict(&self, board: &Grid) -> Result<String, AiError> {
        let text = self.post_text("/predict", board.rows()).await?;
        Ok(parse_prediction(&text))
    }
}
