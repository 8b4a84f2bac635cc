//! In-memory statistics over trip records.
//!
//! The processing layer operates on [`crate::types::RecordCollection`] values produced by
//! ingestion. Nothing here mutates its input.
//!
//! Currently implemented:
//!
//! - [`filter`]: month / day-of-week restriction ([`by_month`], [`by_day`], [`by_criteria`])
//! - [`aggregate`]: [`mode`], [`value_counts`], [`extremes_and_mean`], [`sum`], [`top_pair`]
//! - [`duration`]: [`format_duration`]
//! - [`pager`]: [`RawDataPager`] for paging through raw records
//!
//! ## Example: filter → aggregate → format
//!
//! ```rust
//! use bikeshare_stats::ingestion::{load, RawTrip};
//! use bikeshare_stats::processing::{by_month, format_duration, mode, sum, AggregateResult};
//! use bikeshare_stats::types::{Column, Month, Selection, TripSchema, Value};
//!
//! let row = |start: &str, from: &str, secs: &str| RawTrip {
//!     start_time: Some(start.to_string()),
//!     start_station: Some(from.to_string()),
//!     end_station: Some("Canal St".to_string()),
//!     trip_duration: Some(secs.to_string()),
//!     user_type: Some("Subscriber".to_string()),
//!     ..Default::default()
//! };
//! let outcome = load(
//!     TripSchema::required_only(),
//!     vec![
//!         row("2017-06-05 08:00:00", "Clark St", "61"),
//!         row("2017-06-06 09:00:00", "State St", "64"),
//!         row("2017-06-07 10:00:00", "State St", "3600"),
//!         row("2017-01-02 10:00:00", "Clark St", "10"),
//!     ],
//! );
//!
//! // Keep June only.
//! let june = by_month(&outcome.collection, Selection::Only(Month::June));
//!
//! let top = mode(&june, Column::StartStation).into_value().unwrap();
//! assert_eq!(top.value, Value::Utf8("State St".to_string()));
//! assert_eq!(top.count, 2);
//!
//! let AggregateResult::Value(total) = sum(&june, Column::TripDuration) else { unreachable!() };
//! assert_eq!(format_duration(total), "1 hour, 2 minutes, 5 seconds");
//! ```

pub mod aggregate;
pub mod duration;
pub mod filter;
pub mod pager;

pub use aggregate::{extremes_and_mean, mode, sum, top_pair, value_counts, AggregateResult, Counted, Extremes};
pub use duration::{format_duration, DurationParts};
pub use filter::{by_criteria, by_day, by_day_name, by_month, by_month_name};
pub use pager::{Batch, RawDataPager, DEFAULT_BATCH_SIZE};
