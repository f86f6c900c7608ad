//! Status extraction
//!
//! Turns the newest homework entry of a validated response into a typed
//! record and the verdict message sent to the chat.

use serde_json::Value as JsonValue;

use crate::domain::homework::{HomeworkRecord, HomeworkStatus};
use crate::error::{PollError, Result};

/// Extracts a typed record from a raw homework entry
///
/// `None` means the response had no entries, which is reported as
/// [`PollError::EmptyInput`].
pub fn extract(entry: Option<&JsonValue>) -> Result<HomeworkRecord> {
    let entry = entry.ok_or(PollError::EmptyInput)?;

    let homework_name = field(entry, "homework_name")?;
    let status = field(entry, "status")?;

    let status = status
        .as_str()
        .and_then(HomeworkStatus::from_code)
        .ok_or_else(|| PollError::UnknownStatus(status_text(status)))?;

    let homework_name = homework_name
        .as_str()
        .ok_or(PollError::Shape("homework_name not a string"))?;

    Ok(HomeworkRecord::new(homework_name, status))
}

fn field<'a>(entry: &'a JsonValue, name: &'static str) -> Result<&'a JsonValue> {
    entry
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or(PollError::MissingField(name))
}

fn status_text(status: &JsonValue) -> String {
    match status {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
