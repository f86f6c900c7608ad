//! Error taxonomy for a single poll iteration

use thiserror::Error;

/// Result type alias for poll operations
pub type Result<T> = std::result::Result<T, PollError>;

/// Everything that can go wrong between fetching the review API and
/// delivering a chat notification
#[derive(Debug, Error)]
pub enum PollError {
    /// The request never produced a usable response
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The review API answered with a non-success status code
    #[error("Unexpected HTTP status {status}. Headers: {headers:?}. Body: {body}")]
    UnexpectedStatus {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },

    /// The payload does not have the expected structure
    #[error("Malformed response: {0}")]
    Shape(&'static str),

    /// A required key is absent
    #[error("Missing field \"{0}\"")]
    MissingField(&'static str),

    /// The record carries a status outside the known verdict set
    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    /// The response carried no homework entries
    #[error("No new status: the homework list is empty")]
    EmptyInput,

    /// Chat delivery failed
    #[error("Failed to deliver \"{message}\": {cause}")]
    Notification { message: String, cause: String },

    /// Anything not covered above
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

/// How loudly the poll loop reports an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Normal "nothing to do" outcome, traced at debug level
    Quiet,
    /// Iteration failure, logged as critical
    Critical,
}

impl PollError {
    /// Classifies the error for the poll loop
    pub fn severity(&self) -> Severity {
        match self {
            Self::EmptyInput => Severity::Quiet,
            Self::Transport(_)
            | Self::UnexpectedStatus { .. }
            | Self::Shape(_)
            | Self::MissingField(_)
            | Self::UnknownStatus(_)
            | Self::Notification { .. }
            | Self::Unexpected(_) => Severity::Critical,
        }
    }

    /// Creates a delivery failure from the message and its cause
    pub fn notification(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Notification {
            message: message.into(),
            cause: cause.to_string(),
        }
    }
}
