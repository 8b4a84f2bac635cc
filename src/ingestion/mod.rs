//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] or [`ingest_city`] (from [`unified`]) which:
//!
//! - auto-detect format by file extension (or you can override via [`IngestionOptions`])
//! - load the trip log into an in-memory [`crate::types::RecordCollection`], skipping rows
//!   that fail to parse
//! - optionally report success/skipped rows/failure/alerts to an [`IngestionObserver`]
//!
//! In-memory rows can be loaded directly with [`load`]. Format-specific functions are also
//! available under:
//! - [`csv`]
//! - [`json`]

pub mod csv;
pub mod json;
pub mod observability;
pub mod records;
pub mod unified;

pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use records::{load, parse_timestamp, LoadOutcome, RawTrip, RecordLoader};
pub use unified::{ingest_city, ingest_from_path, IngestionFormat, IngestionOptions};
