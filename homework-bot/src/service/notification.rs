//! Notification gate
//!
//! Decides whether a freshly extracted record is news. A record is delivered
//! only when it differs from the last delivered one, and it becomes the
//! remembered one only once delivery has succeeded. A failed delivery leaves
//! the memory as it was, so the same change is retried on the next poll.

use homework_core::domain::homework::HomeworkRecord;
use homework_core::domain::memory::NotificationMemory;
use homework_core::{PollError, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::repository::ChatRepository;

/// What the gate did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The record was new and has been delivered
    Delivered,
    /// The record matches the last delivered one
    Unchanged,
}

pub struct NotificationGate {
    chat: Arc<dyn ChatRepository>,
    memory: NotificationMemory,
}

impl NotificationGate {
    pub fn new(chat: Arc<dyn ChatRepository>) -> Self {
        Self {
            chat,
            memory: NotificationMemory::new(),
        }
    }

    /// Starts from an already populated memory
    #[cfg(test)]
    pub fn with_memory(chat: Arc<dyn ChatRepository>, memory: NotificationMemory) -> Self {
        Self { chat, memory }
    }

    #[cfg(test)]
    pub fn memory(&self) -> &NotificationMemory {
        &self.memory
    }

    /// Delivers `record` if it is news and remembers it on success
    pub async fn process(&mut self, record: &HomeworkRecord) -> Result<GateDecision> {
        if !self.memory.differs(record) {
            debug!("No new status in the response");
            return Ok(GateDecision::Unchanged);
        }

        let message = record.message();
        info!("{}", message);

        self.deliver(&message).await?;
        self.memory.commit(record);

        Ok(GateDecision::Delivered)
    }

    async fn deliver(&self, message: &str) -> Result<()> {
        debug!("Sending message to chat");

        match self.chat.send(message).await {
            Ok(()) => {
                debug!("Message \"{}\" delivered", message);
                Ok(())
            }
            Err(e) => {
                error!("Failed to send message \"{}\": {:#}", message, e);
                Err(PollError::notification(message, format!("{:#}", e)))
            }
        }
    }
}
