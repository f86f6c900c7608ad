//! Telegram Bot API

use reqwest::{Client, Request};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::handle_response;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct BotResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// HTTP client for sending chat messages through a Telegram bot
#[derive(Clone)]
pub struct TelegramClient {
    /// Base URL of the Bot API (e.g., "https://api.telegram.org")
    base_url: String,
    /// Bot token
    token: String,
    /// HTTP client instance
    client: Client,
}

impl TelegramClient {
    /// Create a new Bot API client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new Bot API client with a custom HTTP client
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the Bot API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a `sendMessage` request without sending it
    pub fn send_message_request(&self, chat_id: &str, text: &str) -> Result<Request> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let request = self
            .client
            .post(&url)
            .json(&SendMessage { chat_id, text })
            .build()?;
        Ok(request)
    }

    /// Send a text message to a chat
    ///
    /// # Arguments
    /// * `chat_id` - Destination chat identifier
    /// * `text` - Message text
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let request = self.send_message_request(chat_id, text)?;
        debug!("Sending message to chat {}", chat_id);

        let response = self.client.execute(request).await?;
        let body: BotResponse = handle_response(response).await?;

        if !body.ok {
            return Err(ClientError::Rejected(
                body.description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
