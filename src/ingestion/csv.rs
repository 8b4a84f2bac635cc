//! CSV ingestion implementation.

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{Column, TripSchema};

use super::records::{LoadOutcome, RawTrip, RecordLoader};

/// Ingest a CSV trip log into an in-memory [`crate::types::RecordCollection`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain every required trip column (order can differ, extra columns are
///   ignored).
/// - Optional columns (End Time, Gender, Birth Year) that are present end up in the
///   collection's [`TripSchema`].
/// - Rows that fail to parse are skipped, see [`LoadOutcome::skipped`].
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<LoadOutcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> IngestionResult<LoadOutcome> {
    // Row decoding matches headers exactly, so padding is stripped once up front.
    let headers: csv::StringRecord = rdr.headers()?.iter().map(str::trim).collect();
    rdr.set_headers(headers.clone());

    for column in Column::REQUIRED {
        let Some(name) = column.header() else { continue };
        if !headers.iter().any(|h| h == name) {
            return Err(IngestionError::SchemaMismatch {
                message: format!(
                    "missing required column '{name}'. headers={:?}",
                    headers.iter().collect::<Vec<_>>()
                ),
            });
        }
    }

    let mut loader = RecordLoader::new(TripSchema::from_headers(headers.iter()));
    for (row_idx0, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let row = row_idx0 + 1;
        match result {
            Ok(raw) => {
                loader.push(row, raw);
            }
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => loader.reject(IngestionError::ParseError {
                row,
                column: "<record>".to_string(),
                raw: String::new(),
                message: e.to_string(),
            }),
        }
    }

    Ok(loader.finish())
}
