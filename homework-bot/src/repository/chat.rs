//! Chat delivery repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use homework_client::TelegramClient;

/// Repository trait for delivering text to the notification chat
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Sends `text` to the configured destination
    async fn send(&self, text: &str) -> Result<()>;
}

/// Telegram implementation of ChatRepository
pub struct TelegramChatRepository {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramChatRepository {
    /// Creates a new Telegram chat repository
    ///
    /// # Arguments
    /// * `client` - Bot API client
    /// * `chat_id` - Chat that receives every message
    pub fn new(client: TelegramClient, chat_id: String) -> Self {
        Self { client, chat_id }
    }
}

#[async_trait]
impl ChatRepository for TelegramChatRepository {
    #[tracing::instrument(skip_all)]
    async fn send(&self, text: &str) -> Result<()> {
        self.client
            .send_message(&self.chat_id, text)
            .await
            .with_context(|| format!("Telegram sendMessage to chat {} failed", self.chat_id))
    }
}
