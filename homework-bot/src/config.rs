//! Bot configuration
//!
//! Holds the three secrets the bot cannot run without, plus the endpoints and
//! intervals that have sensible defaults. Built once at startup and never
//! re-read.

use std::fmt;
use std::time::Duration;

/// Homework status endpoint of the review API
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Telegram Bot API base URL
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Seconds between two polls
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

/// Seconds before an HTTP call is abandoned
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Bot configuration
#[derive(Clone)]
pub struct Config {
    /// OAuth token for the review API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives the notifications
    pub telegram_chat_id: String,

    /// Review API endpoint
    pub endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Fixed sleep between two iterations of the poll loop
    pub retry_period: Duration,

    /// Timeout applied to every HTTP call
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(
        practicum_token: String,
        telegram_token: String,
        telegram_chat_id: String,
    ) -> Self {
        Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            retry_period: Duration::from_secs(DEFAULT_RETRY_PERIOD_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Names of the required environment variables that are unset or empty
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let missing = self.missing_secrets();
        if !missing.is_empty() {
            anyhow::bail!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
        }

        for (name, url) in [
            ("endpoint", &self.endpoint),
            ("telegram_api_url", &self.telegram_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.retry_period.is_zero() {
            anyhow::bail!("retry_period must be greater than 0");
        }

        if self.http_timeout.is_zero() {
            anyhow::bail!("http_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}
