//! Error types for the homework clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling the review or chat APIs
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {body}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response headers, in the order received
        headers: Vec<(String, String)>,
        /// Raw response body
        body: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The chat API accepted the request but refused to deliver it
    #[error("Message rejected: {0}")]
    Rejected(String),
}

impl ClientError {
    /// Create an API error from status code, headers and body
    pub fn api_error(
        status: u16,
        headers: Vec<(String, String)>,
        body: impl Into<String>,
    ) -> Self {
        Self::ApiError {
            status,
            headers,
            body: body.into(),
        }
    }
}
