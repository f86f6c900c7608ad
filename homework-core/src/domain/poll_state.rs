//! Poll watermark

use serde_json::Value as JsonValue;

/// Timestamp bounding the next fetch (`from_date`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    pub timestamp: i64,
}

impl PollState {
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }

    /// Starts the watermark at the current time
    pub fn starting_now() -> Self {
        Self::new(chrono::Utc::now().timestamp())
    }

    /// Watermark the server asks for next
    ///
    /// Uses `current_date` from the payload when it is an integer and keeps
    /// the current value otherwise.
    pub fn next_from(&self, payload: &JsonValue) -> PollState {
        let timestamp = payload
            .get("current_date")
            .and_then(JsonValue::as_i64)
            .unwrap_or(self.timestamp);
        PollState::new(timestamp)
    }
}
