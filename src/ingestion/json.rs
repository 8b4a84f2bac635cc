//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"Start Time": "...", ...}, ...]`
//! - Newline-delimited JSON (NDJSON), one object per line
//!
//! Cells may be strings or numbers; `null` counts as missing.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{Column, TripSchema};

use super::records::{LoadOutcome, RawTrip, RecordLoader};

/// Ingest a JSON trip log into an in-memory [`crate::types::RecordCollection`].
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> IngestionResult<LoadOutcome> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text)
}

/// Ingest JSON from an in-memory string.
///
/// The dataset's optional columns are the union of keys seen across all objects. A row that is
/// not an object (or an NDJSON line that is not valid JSON) is skipped like any other bad row.
pub fn ingest_json_from_str(input: &str) -> IngestionResult<LoadOutcome> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    let rows: Vec<Result<JsonValue, String>> = match serde_json::from_str::<JsonValue>(trimmed) {
        Ok(JsonValue::Array(items)) => items.into_iter().map(Ok).collect(),
        Ok(v @ JsonValue::Object(_)) => vec![Ok(v)],
        Ok(_) => {
            return Err(IngestionError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            });
        }
        // Fall back to NDJSON.
        Err(_) => trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str::<JsonValue>(line).map_err(|e| e.to_string()))
            .collect(),
    };

    let keys: HashSet<&str> = rows
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .filter_map(JsonValue::as_object)
        .flat_map(|obj| obj.keys().map(String::as_str))
        .collect();

    if !keys.is_empty() {
        for column in Column::REQUIRED {
            let Some(name) = column.header() else { continue };
            if !keys.contains(name) {
                return Err(IngestionError::SchemaMismatch {
                    message: format!("missing required field '{name}' in every row"),
                });
            }
        }
    }

    let mut loader = RecordLoader::new(TripSchema::from_headers(keys.iter().copied()));
    for (idx0, row) in rows.iter().enumerate() {
        let row_num = idx0 + 1;
        match row {
            Ok(JsonValue::Object(obj)) => {
                loader.push(row_num, raw_trip_from_object(obj));
            }
            Ok(other) => loader.reject(record_error(row_num, other.to_string(), "row is not a json object")),
            Err(message) => loader.reject(record_error(row_num, String::new(), message)),
        }
    }

    Ok(loader.finish())
}

fn raw_trip_from_object(obj: &Map<String, JsonValue>) -> RawTrip {
    RawTrip {
        start_time: cell_text(obj, Column::StartTime),
        end_time: cell_text(obj, Column::EndTime),
        start_station: cell_text(obj, Column::StartStation),
        end_station: cell_text(obj, Column::EndStation),
        trip_duration: cell_text(obj, Column::TripDuration),
        user_type: cell_text(obj, Column::UserType),
        gender: cell_text(obj, Column::Gender),
        birth_year: cell_text(obj, Column::BirthYear),
    }
}

fn cell_text(obj: &Map<String, JsonValue>, column: Column) -> Option<String> {
    match obj.get(column.header()?)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn record_error(row: usize, raw: String, message: impl Into<String>) -> IngestionError {
    IngestionError::ParseError {
        row,
        column: "<record>".to_string(),
        raw,
        message: message.into(),
    }
}
