//! Execution engine producing a full [`TripReport`] for one query.
//!
//! This module sits "above" [`crate::processing`] and provides:
//!
//! - Filtering by [`FilterCriteria`] followed by the four report sections
//! - Optional parallel evaluation of the (mutually independent) sections on a rayon pool
//! - Observer hooks with per-section timings

mod observer;
mod report;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::processing::by_criteria;
use crate::types::{FilterCriteria, RecordCollection};

pub use observer::{ExecutionEvent, ExecutionObserver, TracingExecutionObserver};
pub use report::{
    duration_stats, station_stats, time_stats, user_stats, DurationStats, Section, SectionTimings, StationStats,
    TimeStats, TripReport, UserStats,
};

/// Configuration for the [`StatsEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Evaluate the report sections concurrently.
    pub parallel: bool,
    /// Number of worker threads used when `parallel` is set.
    ///
    /// If `None`, uses the platform's available parallelism (capped at one thread per section).
    pub num_threads: Option<usize>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            num_threads: None,
        }
    }
}

/// Computes [`TripReport`]s.
///
/// Results do not depend on whether the engine runs in parallel.
pub struct StatsEngine {
    pool: Option<ThreadPool>,
    observer: Option<Arc<dyn ExecutionObserver>>,
}

impl StatsEngine {
    /// Create a new engine with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `num_threads == Some(0)`.
    pub fn new(opts: ExecutionOptions) -> Result<Self, ThreadPoolBuildError> {
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        let pool = if opts.parallel {
            let n_threads = opts.num_threads.unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
                    .min(4)
            });
            Some(ThreadPoolBuilder::new().num_threads(n_threads).build()?)
        } else {
            None
        };

        Ok(Self { pool, observer: None })
    }

    /// An engine that evaluates sections one after another on the calling thread.
    pub fn sequential() -> Self {
        Self {
            pool: None,
            observer: None,
        }
    }

    /// Attach an observer for execution events (timings/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Restrict `collection` to `criteria`'s month and day, then summarize what is left.
    pub fn report(&self, collection: &RecordCollection, criteria: &FilterCriteria) -> TripReport {
        let filtered = by_criteria(collection, criteria);
        self.summarize(&filtered, criteria)
    }

    /// Summarize an already-filtered collection. `criteria` is only recorded in the report.
    pub fn summarize(&self, records: &RecordCollection, criteria: &FilterCriteria) -> TripReport {
        let start = Instant::now();
        self.emit(ExecutionEvent::RunStarted {
            rows: records.len(),
            parallel: self.is_parallel(),
        });

        let ((time, stations), (durations, users)) = match &self.pool {
            Some(pool) => pool.install(|| {
                rayon::join(
                    || {
                        rayon::join(
                            || self.timed(Section::Time, || time_stats(records)),
                            || self.timed(Section::Stations, || station_stats(records)),
                        )
                    },
                    || {
                        rayon::join(
                            || self.timed(Section::Durations, || duration_stats(records)),
                            || self.timed(Section::Users, || user_stats(records)),
                        )
                    },
                )
            }),
            None => (
                (
                    self.timed(Section::Time, || time_stats(records)),
                    self.timed(Section::Stations, || station_stats(records)),
                ),
                (
                    self.timed(Section::Durations, || duration_stats(records)),
                    self.timed(Section::Users, || user_stats(records)),
                ),
            ),
        };

        let total = start.elapsed();
        self.emit(ExecutionEvent::RunFinished { elapsed: total });

        TripReport {
            criteria: *criteria,
            rows: records.len(),
            time: time.0,
            stations: stations.0,
            durations: durations.0,
            users: users.0,
            timings: SectionTimings {
                time: time.1,
                stations: stations.1,
                durations: durations.1,
                users: users.1,
                total,
            },
        }
    }

    fn timed<T>(&self, section: Section, f: impl FnOnce() -> T) -> (T, Duration) {
        let start = Instant::now();
        let out = f();
        let elapsed = start.elapsed();
        self.emit(ExecutionEvent::SectionFinished { section, elapsed });
        (out, elapsed)
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
