use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// `Io`, `Csv` and `SchemaMismatch` abort a load. `ParseError` is row-level: loaders record it
/// in [`crate::ingestion::LoadOutcome::skipped`] and carry on with the next row.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error that is not tied to a single record (bad header row, I/O mid-stream).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The source does not have the shape of a trip log (missing required columns, not JSON, ...).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A row could not be turned into a [`crate::types::TripRecord`].
    ///
    /// `row` is the 1-based position among data rows (the header is not counted).
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// A city/month/day selection that is not part of its fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown city '{0}' (expected chicago, new york city or washington)")]
    UnknownCity(String),

    #[error("unknown month '{0}' (expected a full month name or 'all')")]
    UnknownMonth(String),

    #[error("unknown day '{0}' (expected a full weekday name or 'all')")]
    UnknownDay(String),
}
