//! Homework review API

use reqwest::{Client, Request};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::Result;
use crate::handle_response;

/// HTTP client for the homework status endpoint
///
/// Every request carries `Authorization: OAuth <token>` and a single
/// `from_date` query parameter.
#[derive(Clone)]
pub struct PracticumClient {
    /// Full URL of the homework status endpoint
    endpoint: String,
    /// OAuth token
    token: String,
    /// HTTP client instance
    client: Client,
}

impl PracticumClient {
    /// Create a new review API client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the homework status endpoint
    /// * `token` - OAuth token of the student account
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Create a new review API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the status request without sending it
    pub fn homework_request(&self, from_date: i64) -> Result<Request> {
        let request = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .build()?;
        Ok(request)
    }

    /// Fetch homework statuses changed since `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp bounding the query window
    ///
    /// # Returns
    /// The decoded JSON payload, unvalidated
    pub async fn homework_statuses(&self, from_date: i64) -> Result<JsonValue> {
        let request = self.homework_request(from_date)?;
        debug!("Requesting homework statuses from {}", request.url());

        let response = self.client.execute(request).await?;

        handle_response(response).await
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}
