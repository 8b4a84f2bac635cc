//! `bikeshare-stats` answers descriptive-statistics questions ("most common month", "most
//! frequent station pair", "total trip time") over a bike-share trip log, after restricting the
//! log to a chosen month and/or day of week.
//!
//! The primary entrypoints are [`ingestion::ingest_from_path`] / [`ingestion::ingest_city`],
//! which load a trip log into an in-memory [`types::RecordCollection`], and
//! [`execution::StatsEngine`], which turns a collection plus a [`types::FilterCriteria`] into a
//! [`execution::TripReport`].
//!
//! ## What you can ingest
//!
//! **File formats (auto-detected by extension):**
//!
//! - **CSV**: `.csv` with a header row
//! - **JSON**: `.json` (array-of-objects) and `.ndjson` (newline-delimited objects)
//!
//! **Columns:**
//!
//! | Header        | Required | Typed as                              |
//! |---------------|----------|---------------------------------------|
//! | Start Time    | yes      | timestamp (month/day/hour derived)    |
//! | End Time      | no       | timestamp                             |
//! | Start Station | yes      | string                                |
//! | End Station   | yes      | string                                |
//! | Trip Duration | yes      | seconds, `>= 0`                       |
//! | User Type     | yes      | string                                |
//! | Gender        | no       | string                                |
//! | Birth Year    | no       | integer                               |
//!
//! Empty cells are missing values, never zero or `""`. Rows that fail to parse are skipped and
//! listed in [`ingestion::LoadOutcome::skipped`].
//!
//! ## Quick example: one query end to end
//!
//! ```no_run
//! use bikeshare_stats::config::DatasetConfig;
//! use bikeshare_stats::execution::{ExecutionOptions, StatsEngine};
//! use bikeshare_stats::ingestion::IngestionOptions;
//! use bikeshare_stats::session::Session;
//! use bikeshare_stats::types::FilterCriteria;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let criteria = FilterCriteria::parse("chicago", "june", "all")?;
//! let session = Session::open(criteria, &DatasetConfig::from_env(), &IngestionOptions::default())?;
//!
//! let engine = StatsEngine::new(ExecutionOptions::default())?;
//! let report = engine.report(session.full(), session.criteria());
//! println!("total travel time: {}", report.durations.total_display);
//!
//! let mut pager = session.pager();
//! let first = pager.next_batch();
//! println!("first {} raw rows", first.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loading trip logs (CSV/JSON) into record collections
//! - [`types`]: trip records, calendar enumerations, filter criteria
//! - [`processing`]: filters, aggregations, duration formatting, raw-data pager
//! - [`execution`]: the report engine
//! - [`session`]: a loaded dataset plus one query
//! - [`config`]: where each city's trip log lives
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod processing;
pub mod session;
pub mod types;

pub use error::{IngestionError, IngestionResult, SelectionError};
