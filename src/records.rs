use crate::constants::SOURCE_FIELD;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use serde_json::{Deserializer, Value as JsonValue};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads records from a JSON export file.
///
/// See [`parse_records`] for the accepted layouts.
pub fn load_records(path: &Path) -> AppResult<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::IoError(format!("Failed to read records file {}: {e}", path.display()))
    })?;
    let records = parse_records(&content)?;
    debug!(
        file = %path.display(),
        records = records.len(),
        "Loaded records"
    );
    Ok(records)
}

/// Parses records from JSON text.
///
/// Accepts a JSON array of objects, or a stream of objects (JSON Lines, as
/// written by index dump tools). Objects that are search-index hits, i.e.
/// carry an object-valued `_source`, are replaced by that source document.
/// Key order of every object is preserved.
///
/// # Errors
///
/// Returns `ParseError` for invalid JSON and `InvalidInput` when an entry is
/// not an object.
pub fn parse_records(content: &str) -> AppResult<Vec<Record>> {
    let values: Vec<JsonValue> = if content.trim_start().starts_with('[') {
        serde_json::from_str(content)?
    } else {
        Deserializer::from_str(content)
            .into_iter::<JsonValue>()
            .collect::<Result<_, _>>()?
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            Record::try_from(unwrap_hit(value)).map_err(|e| match e {
                AppError::InvalidInput(msg) => {
                    AppError::InvalidInput(format!("Record {}: {msg}", index + 1))
                }
                other => other,
            })
        })
        .collect()
}

fn unwrap_hit(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(mut hit) if hit.get(SOURCE_FIELD).is_some_and(JsonValue::is_object) => hit
            .get_mut(SOURCE_FIELD)
            .map(JsonValue::take)
            .unwrap_or_default(),
        other => other,
    }
}
