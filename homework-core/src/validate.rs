//! Response validation
//!
//! Checks the decoded review API payload before any business logic looks at
//! it. Individual homework entries are left untouched here; an empty list is
//! a valid answer meaning "nothing new".

use serde_json::Value as JsonValue;

use crate::error::{PollError, Result};

/// Validates the payload shape and returns the homework entries in order
///
/// Checks run in a fixed order: mapping, `homeworks` present,
/// `current_date` present, `homeworks` is a list. A JSON `null` counts as
/// absent.
pub fn validate(payload: &JsonValue) -> Result<&[JsonValue]> {
    let object = payload
        .as_object()
        .ok_or(PollError::Shape("not a mapping"))?;

    let homeworks = present(object.get("homeworks")).ok_or(PollError::MissingField("homeworks"))?;

    if present(object.get("current_date")).is_none() {
        return Err(PollError::MissingField("current_date"));
    }

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(PollError::Shape("homeworks not a list"))
}

fn present(value: Option<&JsonValue>) -> Option<&JsonValue> {
    value.filter(|v| !v.is_null())
}
