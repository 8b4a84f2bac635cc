//! Raw row → [`TripRecord`] conversion shared by every source format.
//!
//! A row that cannot be converted is skipped and reported in [`LoadOutcome::skipped`]; one bad
//! row never aborts a load.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::IngestionError;
use crate::types::{Column, RecordCollection, TripRecord, TripSchema};

/// Accepted `Start Time` / `End Time` layouts, tried in order.
const TIMESTAMP_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// One untyped source row, keyed by the trip-log column headers.
///
/// `None` means the cell (or the whole column) is absent. Columns not listed here, such as the
/// unnamed index column some exports carry, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time", default)]
    pub start_time: Option<String>,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Start Station", default)]
    pub start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    pub end_station: Option<String>,
    #[serde(rename = "Trip Duration", default)]
    pub trip_duration: Option<String>,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<String>,
}

/// Result of a load: the records that parsed, plus the row-level errors that were skipped.
#[derive(Debug)]
pub struct LoadOutcome {
    pub collection: RecordCollection,
    /// Only [`IngestionError::ParseError`] values, in row order.
    pub skipped: Vec<IngestionError>,
}

impl LoadOutcome {
    /// Number of records that made it into the collection.
    pub fn loaded(&self) -> usize {
        self.collection.len()
    }
}

/// Single-pass accumulator turning raw rows into a [`RecordCollection`].
#[derive(Debug)]
pub struct RecordLoader {
    schema: TripSchema,
    records: Vec<TripRecord>,
    skipped: Vec<IngestionError>,
}

impl RecordLoader {
    /// Optional columns the schema does not carry are never read, even if a row has them.
    pub fn new(schema: TripSchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Convert and append one row. `row` is its 1-based position among data rows.
    ///
    /// Returns `false` if the row was skipped.
    pub fn push(&mut self, row: usize, raw: RawTrip) -> bool {
        match parse_trip(row, raw, self.schema) {
            Ok(record) => {
                self.records.push(record);
                true
            }
            Err(e) => {
                self.skipped.push(e);
                false
            }
        }
    }

    /// Record a row the source reader itself could not decode.
    pub fn reject(&mut self, error: IngestionError) {
        self.skipped.push(error);
    }

    pub fn finish(self) -> LoadOutcome {
        LoadOutcome {
            collection: RecordCollection::new(self.schema, self.records),
            skipped: self.skipped,
        }
    }
}

/// Load an ordered sequence of raw rows into a [`RecordCollection`], preserving row order.
///
/// Malformed rows are skipped and listed in [`LoadOutcome::skipped`].
pub fn load(schema: TripSchema, rows: impl IntoIterator<Item = RawTrip>) -> LoadOutcome {
    let mut loader = RecordLoader::new(schema);
    for (idx0, raw) in rows.into_iter().enumerate() {
        loader.push(idx0 + 1, raw);
    }
    loader.finish()
}

/// Parse a timestamp in any of the accepted layouts.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn parse_trip(row: usize, raw: RawTrip, schema: TripSchema) -> Result<TripRecord, IngestionError> {
    let start_raw = required(row, Column::StartTime, raw.start_time)?;
    let start_time = timestamp(row, Column::StartTime, &start_raw)?;
    let start_station = required(row, Column::StartStation, raw.start_station)?;
    let end_station = required(row, Column::EndStation, raw.end_station)?;
    let duration_raw = required(row, Column::TripDuration, raw.trip_duration)?;
    let trip_duration = duration(row, &duration_raw)?;
    let user_type = required(row, Column::UserType, raw.user_type)?;

    let mut record = TripRecord::new(start_time, start_station, end_station, trip_duration, user_type);

    if schema.end_time {
        if let Some(end_raw) = cell(raw.end_time) {
            record = record.with_end_time(timestamp(row, Column::EndTime, &end_raw)?);
        }
    }
    if schema.gender {
        if let Some(gender) = cell(raw.gender) {
            record = record.with_gender(gender);
        }
    }
    if schema.birth_year {
        if let Some(year_raw) = cell(raw.birth_year) {
            record = record.with_birth_year(birth_year(row, &year_raw)?);
        }
    }

    Ok(record)
}

/// Trimmed cell text; empty cells count as missing.
fn cell(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_owned())
    }
}

fn required(row: usize, column: Column, value: Option<String>) -> Result<String, IngestionError> {
    cell(value).ok_or_else(|| parse_error(row, column, "", "missing required value"))
}

fn timestamp(row: usize, column: Column, raw: &str) -> Result<NaiveDateTime, IngestionError> {
    parse_timestamp(raw).ok_or_else(|| parse_error(row, column, raw, "unrecognized timestamp"))
}

fn duration(row: usize, raw: &str) -> Result<f64, IngestionError> {
    let secs = raw
        .parse::<f64>()
        .map_err(|e| parse_error(row, Column::TripDuration, raw, e.to_string()))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(parse_error(
            row,
            Column::TripDuration,
            raw,
            "expected a finite, non-negative number of seconds",
        ));
    }
    Ok(secs)
}

// Spreadsheet exports write birth years as floats ("1992.0").
fn birth_year(row: usize, raw: &str) -> Result<i32, IngestionError> {
    if let Ok(year) = raw.parse::<i32>() {
        return Ok(year);
    }
    let year = raw
        .parse::<f64>()
        .map_err(|e| parse_error(row, Column::BirthYear, raw, e.to_string()))?;
    if year.fract() != 0.0 || year < f64::from(i32::MIN) || year > f64::from(i32::MAX) {
        return Err(parse_error(row, Column::BirthYear, raw, "expected a whole year"));
    }
    Ok(year as i32)
}

fn parse_error(row: usize, column: Column, raw: &str, message: impl Into<String>) -> IngestionError {
    IngestionError::ParseError {
        row,
        column: column.name().to_owned(),
        raw: raw.to_owned(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::{load, parse_timestamp, RawTrip};
    use crate::error::IngestionError;
    use crate::types::{Column, Month, TripSchema, Weekday};

    fn raw(start: &str, from: &str, to: &str, secs: &str) -> RawTrip {
        RawTrip {
            start_time: Some(start.to_string()),
            start_station: Some(from.to_string()),
            end_station: Some(to.to_string()),
            trip_duration: Some(secs.to_string()),
            user_type: Some("Subscriber".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn load_derives_temporal_fields_and_keeps_order() {
        let out = load(
            TripSchema::required_only(),
            vec![
                raw("2017-06-23 15:09:32", "A", "B", "321"),
                raw("2017-01-01 00:07:57", "C", "D", "776"),
            ],
        );

        assert!(out.skipped.is_empty());
        let records = out.collection.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start_station(), "A");
        assert_eq!(records[0].month(), Month::June);
        assert_eq!(records[0].day_of_week(), Weekday::Friday);
        assert_eq!(records[0].start_hour(), 15);
        assert_eq!(records[1].month(), Month::January);
        assert_eq!(records[1].day_of_week(), Weekday::Sunday);
    }

    #[test]
    fn malformed_rows_are_skipped_and_load_continues() {
        let out = load(
            TripSchema::required_only(),
            vec![
                raw("2017-06-23 15:09:32", "A", "B", "321"),
                raw("not a date", "C", "D", "10"),
                raw("2017-06-24 10:00:00", "E", "F", "-5"),
                raw("2017-06-24 11:00:00", "G", "H", "42"),
            ],
        );

        assert_eq!(out.loaded(), 2);
        assert_eq!(out.collection.records()[1].start_station(), "G");
        assert_eq!(out.skipped.len(), 2);
        match &out.skipped[0] {
            IngestionError::ParseError { row, column, raw, .. } => {
                assert_eq!(*row, 2);
                assert_eq!(column, "Start Time");
                assert_eq!(raw, "not a date");
            }
            other => panic!("unexpected error: {other}"),
        }
        let msg = out.skipped[1].to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("column 'Trip Duration'"));
    }

    #[test]
    fn missing_required_cell_skips_row() {
        let mut r = raw("2017-06-23 15:09:32", "A", "B", "321");
        r.user_type = Some("   ".to_string());
        let out = load(TripSchema::required_only(), vec![r]);
        assert_eq!(out.loaded(), 0);
        assert!(out.skipped[0].to_string().contains("missing required value"));
    }

    #[test]
    fn optional_cells_are_absent_not_defaulted() {
        let mut with_demo = raw("2017-06-23 15:09:32", "A", "B", "321");
        with_demo.gender = Some("Male".to_string());
        with_demo.birth_year = Some("1992.0".to_string());
        with_demo.end_time = Some("2017-06-23 15:14:53".to_string());
        let mut without_demo = raw("2017-06-23 16:00:00", "A", "B", "100");
        without_demo.gender = Some(String::new());

        let out = load(TripSchema::full(), vec![with_demo, without_demo]);
        assert!(out.skipped.is_empty());
        let records = out.collection.records();
        assert_eq!(records[0].gender(), Some("Male"));
        assert_eq!(records[0].birth_year(), Some(1992));
        assert!(records[0].end_time().is_some());
        assert_eq!(records[1].gender(), None);
        assert_eq!(records[1].birth_year(), None);
    }

    #[test]
    fn columns_outside_schema_are_not_read() {
        let mut r = raw("2017-06-23 15:09:32", "A", "B", "321");
        r.gender = Some("Female".to_string());
        r.birth_year = Some("garbage".to_string());
        let out = load(TripSchema::required_only(), vec![r]);
        assert_eq!(out.loaded(), 1);
        assert_eq!(out.collection.records()[0].gender(), None);
        assert!(!out.collection.has_column(Column::Gender));
    }

    #[test]
    fn fractional_birth_year_is_rejected() {
        let mut r = raw("2017-06-23 15:09:32", "A", "B", "321");
        r.birth_year = Some("1992.5".to_string());
        let out = load(TripSchema::full(), vec![r]);
        assert_eq!(out.loaded(), 0);
        assert!(out.skipped[0].to_string().contains("column 'Birth Year'"));
    }

    #[test]
    fn timestamp_layouts() {
        for s in [
            "2017-06-23 15:09:32",
            "2017-06-23 15:09:32.250",
            "2017-06-23T15:09:32",
            "2017/06/23 15:09:32",
            "06/23/2017 15:09:32",
            "06/23/2017 15:09",
        ] {
            assert!(parse_timestamp(s).is_some(), "failed to parse {s}");
        }
        assert!(parse_timestamp("23 June 2017").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
