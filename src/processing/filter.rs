//! Month / day-of-week filtering for [`crate::types::RecordCollection`].

use crate::error::SelectionError;
use crate::types::{FilterCriteria, Month, RecordCollection, Selection, Weekday};

/// Returns the records whose derived month is selected.
///
/// [`Selection::All`] returns an unchanged copy of the input.
pub fn by_month(records: &RecordCollection, month: Selection<Month>) -> RecordCollection {
    match month {
        Selection::All => records.clone(),
        Selection::Only(m) => records.filter_records(|r| r.month() == m),
    }
}

/// Returns the records whose derived day of week is selected.
///
/// [`Selection::All`] returns an unchanged copy of the input.
pub fn by_day(records: &RecordCollection, day: Selection<Weekday>) -> RecordCollection {
    match day {
        Selection::All => records.clone(),
        Selection::Only(d) => records.filter_records(|r| r.day_of_week() == d),
    }
}

/// [`by_month`] taking a user-entered month name or `"all"` (case-insensitive).
pub fn by_month_name(records: &RecordCollection, month: &str) -> Result<RecordCollection, SelectionError> {
    Ok(by_month(records, month.parse()?))
}

/// [`by_day`] taking a user-entered day name or `"all"` (case-insensitive).
pub fn by_day_name(records: &RecordCollection, day: &str) -> Result<RecordCollection, SelectionError> {
    Ok(by_day(records, day.parse()?))
}

/// Apply both the month and the day restriction of `criteria` in one pass.
///
/// The city is not consulted; it only selects which dataset gets loaded.
pub fn by_criteria(records: &RecordCollection, criteria: &FilterCriteria) -> RecordCollection {
    match (criteria.month, criteria.day) {
        (Selection::All, Selection::All) => records.clone(),
        (month, day) => {
            records.filter_records(|r| month.matches(&r.month()) && day.matches(&r.day_of_week()))
        }
    }
}
