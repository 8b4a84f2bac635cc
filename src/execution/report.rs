//! Report sections computed by the [`super::StatsEngine`].
//!
//! Each `*_stats` function is pure and independent of the others, so the engine is free to run
//! them concurrently.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::processing::{
    extremes_and_mean, format_duration, mode, sum, top_pair, value_counts, AggregateResult, Counted, Extremes,
};
use crate::types::{Column, FilterCriteria, RecordCollection, Value};

/// The four statistic groups of a [`TripReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Time,
    Stations,
    Durations,
    Users,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Time => "time",
            Section::Stations => "stations",
            Section::Durations => "durations",
            Section::Users => "users",
        })
    }
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub most_common_month: AggregateResult<Counted<Value>>,
    pub most_common_day: AggregateResult<Counted<Value>>,
    pub most_common_start_hour: AggregateResult<Counted<Value>>,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: AggregateResult<Counted<Value>>,
    pub most_common_end_station: AggregateResult<Counted<Value>>,
    pub most_common_trip: AggregateResult<Counted<(Value, Value)>>,
}

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: AggregateResult<f64>,
    /// [`format_duration`] of the total; empty when there is nothing to show.
    pub total_display: String,
    pub mean_seconds: AggregateResult<f64>,
    pub mean_display: String,
    /// Shortest, longest and mean trip.
    pub trip_extremes: AggregateResult<Extremes>,
}

/// Rider breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: AggregateResult<Vec<Counted<Value>>>,
    pub genders: AggregateResult<Vec<Counted<Value>>>,
    /// Earliest (`min`) and most recent (`max`) year of birth.
    pub birth_years: AggregateResult<Extremes>,
    pub most_common_birth_year: AggregateResult<Counted<Value>>,
}

/// Wall-clock time spent per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SectionTimings {
    pub time: Duration,
    pub stations: Duration,
    pub durations: Duration,
    pub users: Duration,
    pub total: Duration,
}

/// Everything the presentation layer renders for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub criteria: FilterCriteria,
    /// Records left after filtering.
    pub rows: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
    pub timings: SectionTimings,
}

pub fn time_stats(records: &RecordCollection) -> TimeStats {
    TimeStats {
        most_common_month: mode(records, Column::Month),
        most_common_day: mode(records, Column::DayOfWeek),
        most_common_start_hour: mode(records, Column::StartHour),
    }
}

pub fn station_stats(records: &RecordCollection) -> StationStats {
    StationStats {
        most_common_start_station: mode(records, Column::StartStation),
        most_common_end_station: mode(records, Column::EndStation),
        most_common_trip: top_pair(records, Column::StartStation, Column::EndStation),
    }
}

pub fn duration_stats(records: &RecordCollection) -> DurationStats {
    let total_seconds = sum(records, Column::TripDuration);
    let trip_extremes = extremes_and_mean(records, Column::TripDuration);
    let mean_seconds = trip_extremes.clone().map(|e| e.mean);
    DurationStats {
        total_display: display(&total_seconds),
        mean_display: display(&mean_seconds),
        total_seconds,
        mean_seconds,
        trip_extremes,
    }
}

pub fn user_stats(records: &RecordCollection) -> UserStats {
    UserStats {
        user_types: value_counts(records, Column::UserType),
        genders: value_counts(records, Column::Gender),
        birth_years: extremes_and_mean(records, Column::BirthYear),
        most_common_birth_year: mode(records, Column::BirthYear),
    }
}

fn display(seconds: &AggregateResult<f64>) -> String {
    seconds.value().map(|s| format_duration(*s)).unwrap_or_default()
}
