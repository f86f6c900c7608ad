//! Review API repository
//!
//! Fetches homework statuses and maps transport-level outcomes into the poll
//! error taxonomy.

use async_trait::async_trait;
use homework_client::{ClientError, PracticumClient};
use homework_core::{PollError, Result};
use serde_json::Value as JsonValue;
use tracing::debug;

/// Repository trait for the homework review API
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Fetches statuses changed since `since`
    ///
    /// Performs exactly one request; retrying is left to the poll loop.
    ///
    /// # Returns
    /// The decoded JSON payload, not yet validated
    async fn fetch(&self, since: i64) -> Result<JsonValue>;
}

/// HTTP implementation of ReviewRepository
pub struct HttpReviewRepository {
    client: PracticumClient,
}

impl HttpReviewRepository {
    /// Creates a new HTTP review repository
    pub fn new(client: PracticumClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReviewRepository for HttpReviewRepository {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, since: i64) -> Result<JsonValue> {
        debug!("Requesting homework statuses");

        self.client
            .homework_statuses(since)
            .await
            .map_err(into_poll_error)
    }
}

fn into_poll_error(error: ClientError) -> PollError {
    match error {
        ClientError::RequestFailed(e) => PollError::Transport(e.to_string()),
        ClientError::ApiError {
            status,
            headers,
            body,
        } => PollError::UnexpectedStatus {
            status,
            headers,
            body,
        },
        ClientError::ParseError(message) => PollError::Transport(message),
        ClientError::Rejected(message) => PollError::Unexpected(message),
    }
}
