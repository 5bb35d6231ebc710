//! JSON dataset parsing and record validation.
//!
//! # Format
//! ```json
//! [
//!   { "letter": "A", "sound": "ey", "pronunciation": "/eɪ/" },
//!   { "letter": "B", "sound": "bee", "pronunciation": "/biː/" }
//! ]
//! ```
//!
//! The card dataset wraps its array in a `{ "categories": [...] }` envelope;
//! both shapes are accepted.

use crate::error::{LoadError, Result};
use crate::types::ViewRecord;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a JSON dataset into validated records.
///
/// Elements that are missing a required field, carry a non-string value, or
/// have an empty name are dropped silently. An array where every element is
/// invalid yields `Ok(vec![])`, which the list view renders as an empty
/// state; only an unusable document is an error.
pub fn parse_records<R>(json: &str) -> Result<Vec<R>>
where
    R: DeserializeOwned + ViewRecord,
{
    let root: Value = serde_json::from_str(json).map_err(|e| LoadError::Malformed {
        reason: e.to_string(),
    })?;

    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("categories") {
            Some(Value::Array(items)) => items,
            _ => return Err(LoadError::NotAnArray),
        },
        _ => return Err(LoadError::NotAnArray),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| {
            let record: R = serde_json::from_value(item).ok()?;
            if record.name().trim().is_empty() {
                return None;
            }
            Some(record)
        })
        .collect())
}
