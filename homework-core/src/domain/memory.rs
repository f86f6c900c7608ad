//! Notification memory
//!
//! Remembers the last `{name: status}` pair that was successfully delivered
//! to the chat. Only one pair is tracked at a time.

use super::homework::{HomeworkRecord, HomeworkStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationMemory {
    last: Option<(String, HomeworkStatus)>,
}

impl NotificationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `record` was not the last thing delivered
    pub fn differs(&self, record: &HomeworkRecord) -> bool {
        match &self.last {
            Some((name, status)) => *name != record.homework_name || *status != record.status,
            None => true,
        }
    }

    /// Replaces the remembered pair. Call only after a successful delivery.
    pub fn commit(&mut self, record: &HomeworkRecord) {
        self.last = Some((record.homework_name.clone(), record.status));
    }

    /// Last delivered pair, if any
    pub fn last(&self) -> Option<(&str, HomeworkStatus)> {
        self.last
            .as_ref()
            .map(|(name, status)| (name.as_str(), *status))
    }
}
