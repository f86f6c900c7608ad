//! Homework HTTP Clients
//!
//! Small, typed HTTP clients for the two remote services the notifier talks to:
//! - [`PracticumClient`]: the homework review API, polled for status changes
//! - [`TelegramClient`]: the Telegram Bot API, used to deliver notifications
//!
//! # Example
//!
//! ```no_run
//! use homework_client::{PracticumClient, TelegramClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), homework_client::ClientError> {
//!     let practicum = PracticumClient::new(
//!         "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!         "practicum-token",
//!     );
//!     let payload = practicum.homework_statuses(0).await?;
//!
//!     let telegram = TelegramClient::new("https://api.telegram.org", "bot-token");
//!     telegram.send_message("123456", &payload.to_string()).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod practicum;
mod telegram;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use practicum::PracticumClient;
pub use telegram::TelegramClient;

use serde::de::DeserializeOwned;

// =============================================================================
// Response Handlers
// =============================================================================

/// Checks the status code and deserializes the JSON body
///
/// Non-success responses are turned into [`ClientError::ApiError`] carrying
/// the status, headers and body so callers can log them.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), headers, body));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}
