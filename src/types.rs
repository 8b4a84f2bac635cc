//! Core data model types.
//!
//! Ingestion turns raw rows into [`TripRecord`]s and collects them, together with the
//! [`TripSchema`] of the source, into an in-memory [`RecordCollection`]. The calendar
//! enumerations ([`Month`], [`Weekday`]) and the dataset enumeration ([`City`]) are fixed
//! constant tables; nothing here consults the runtime locale.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::error::SelectionError;

/// Calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// 1-based month number (January = 1).
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Inverse of [`Month::number`].
    pub fn from_number(n: u32) -> Option<Self> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    /// English month name, e.g. `"January"`.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = SelectionError;

    /// Case-insensitive match against the full month name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| SelectionError::UnknownMonth(s.to_string()))
    }
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// 1-based day number (Monday = 1, Sunday = 7).
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// English day name, e.g. `"Monday"`.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = SelectionError;

    /// Case-insensitive match against the full day name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| SelectionError::UnknownDay(s.to_string()))
    }
}

/// A known trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    /// All known datasets.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case display name, as typed by users.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Default file name of the city's trip log.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Columns the city's published dataset carries. Washington has no rider demographics.
    pub fn default_schema(self) -> TripSchema {
        match self {
            City::Chicago | City::NewYorkCity => TripSchema::full(),
            City::Washington => TripSchema {
                end_time: true,
                gender: false,
                birth_year: false,
            },
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| SelectionError::UnknownCity(s.to_string()))
    }
}

/// Either every value, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Returns `true` if `value` is selected.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => v == value,
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = SelectionError>,
{
    type Err = SelectionError;

    /// `"all"` (any case) selects everything; anything else is parsed as `T`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(v) => v.fmt(f),
        }
    }
}

/// The (city, month, day) selection controlling which records are in scope for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub city: City,
    pub month: Selection<Month>,
    pub day: Selection<Weekday>,
}

impl FilterCriteria {
    pub fn new(city: City, month: Selection<Month>, day: Selection<Weekday>) -> Self {
        Self { city, month, day }
    }

    /// No month or day restriction.
    pub fn all(city: City) -> Self {
        Self::new(city, Selection::All, Selection::All)
    }

    /// Validate user-entered names against the fixed enumerations.
    pub fn parse(city: &str, month: &str, day: &str) -> Result<Self, SelectionError> {
        Ok(Self {
            city: city.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        })
    }
}

/// Addressable columns of a [`TripRecord`]: the source columns plus the derived ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    StartTime,
    EndTime,
    StartStation,
    EndStation,
    TripDuration,
    UserType,
    Gender,
    BirthYear,
    Month,
    DayOfWeek,
    StartHour,
}

impl Column {
    /// Source columns every dataset must provide.
    pub const REQUIRED: [Column; 5] = [
        Column::StartTime,
        Column::StartStation,
        Column::EndStation,
        Column::TripDuration,
        Column::UserType,
    ];

    /// Source columns some datasets omit.
    pub const OPTIONAL: [Column; 3] = [Column::EndTime, Column::Gender, Column::BirthYear];

    /// Header of the column in source files; `None` for derived columns.
    pub fn header(self) -> Option<&'static str> {
        match self {
            Column::StartTime => Some("Start Time"),
            Column::EndTime => Some("End Time"),
            Column::StartStation => Some("Start Station"),
            Column::EndStation => Some("End Station"),
            Column::TripDuration => Some("Trip Duration"),
            Column::UserType => Some("User Type"),
            Column::Gender => Some("Gender"),
            Column::BirthYear => Some("Birth Year"),
            Column::Month | Column::DayOfWeek | Column::StartHour => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::Month => "month",
            Column::DayOfWeek => "day_of_week",
            Column::StartHour => "start_hour",
            other => other.header().unwrap_or_default(),
        }
    }

    pub fn is_optional(self) -> bool {
        Self::OPTIONAL.contains(&self)
    }

    pub fn is_derived(self) -> bool {
        self.header().is_none()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell value read out of a [`TripRecord`].
///
/// Floats compare and hash by bit pattern so that numeric columns can be grouped.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int64(i64),
    Float64(f64),
    Utf8(String),
    Timestamp(NaiveDateTime),
    Month(Month),
    Weekday(Weekday),
}

impl Value {
    /// Numeric view of the value; `None` for non-numeric variants.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::Utf8(a), Value::Utf8(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Month(a), Value::Month(b)) => a == b,
            (Value::Weekday(a), Value::Weekday(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Int64(v) => v.hash(state),
            Value::Float64(v) => v.to_bits().hash(state),
            Value::Utf8(s) => s.hash(state),
            Value::Timestamp(t) => t.hash(state),
            Value::Month(m) => m.hash(state),
            Value::Weekday(d) => d.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
            Value::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            Value::Month(m) => m.fmt(f),
            Value::Weekday(d) => d.fmt(f),
        }
    }
}

/// Which optional source columns a dataset provides.
///
/// Required and derived columns are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripSchema {
    pub end_time: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl TripSchema {
    /// Every optional column present.
    pub const fn full() -> Self {
        Self {
            end_time: true,
            gender: true,
            birth_year: true,
        }
    }

    /// No optional column present.
    pub const fn required_only() -> Self {
        Self {
            end_time: false,
            gender: false,
            birth_year: false,
        }
    }

    /// Derive the schema from a source header row (headers are matched after trimming).
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut schema = Self::required_only();
        for header in headers {
            match header.trim() {
                "End Time" => schema.end_time = true,
                "Gender" => schema.gender = true,
                "Birth Year" => schema.birth_year = true,
                _ => {}
            }
        }
        schema
    }

    /// Returns `true` if records of this dataset can carry `column`.
    pub fn has(&self, column: Column) -> bool {
        match column {
            Column::EndTime => self.end_time,
            Column::Gender => self.gender,
            Column::BirthYear => self.birth_year,
            _ => true,
        }
    }
}

impl Default for TripSchema {
    fn default() -> Self {
        Self::full()
    }
}

/// One trip observation.
///
/// `month`, `day_of_week` and `start_hour` are derived from `start_time` when the record is
/// built and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    end_time: Option<NaiveDateTime>,
    start_station: String,
    end_station: String,
    trip_duration: f64,
    user_type: String,
    gender: Option<String>,
    birth_year: Option<i32>,
    month: Month,
    day_of_week: Weekday,
    start_hour: u32,
}

impl TripRecord {
    /// Build a record from its required fields. `trip_duration` is in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `trip_duration` is negative or not finite.
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: f64,
        user_type: impl Into<String>,
    ) -> Self {
        assert!(
            trip_duration.is_finite() && trip_duration >= 0.0,
            "trip_duration must be finite and >= 0"
        );
        Self {
            start_time,
            end_time: None,
            start_station: start_station.into(),
            end_station: end_station.into(),
            trip_duration,
            user_type: user_type.into(),
            gender: None,
            birth_year: None,
            month: Month::ALL[start_time.month0() as usize],
            day_of_week: start_time.weekday().into(),
            start_hour: start_time.hour(),
        }
    }

    pub fn with_end_time(mut self, end_time: NaiveDateTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, birth_year: i32) -> Self {
        self.birth_year = Some(birth_year);
        self
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.end_time
    }

    pub fn start_station(&self) -> &str {
        &self.start_station
    }

    pub fn end_station(&self) -> &str {
        &self.end_station
    }

    /// Trip duration in seconds.
    pub fn trip_duration(&self) -> f64 {
        self.trip_duration
    }

    pub fn user_type(&self) -> &str {
        &self.user_type
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }

    /// Hour of `start_time`, 0-23.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Read a column as a [`Value`]. Returns `None` when the cell is missing.
    pub fn value(&self, column: Column) -> Option<Value> {
        match column {
            Column::StartTime => Some(Value::Timestamp(self.start_time)),
            Column::EndTime => self.end_time.map(Value::Timestamp),
            Column::StartStation => Some(Value::Utf8(self.start_station.clone())),
            Column::EndStation => Some(Value::Utf8(self.end_station.clone())),
            Column::TripDuration => Some(Value::Float64(self.trip_duration)),
            Column::UserType => Some(Value::Utf8(self.user_type.clone())),
            Column::Gender => self.gender.clone().map(Value::Utf8),
            Column::BirthYear => self.birth_year.map(|y| Value::Int64(i64::from(y))),
            Column::Month => Some(Value::Month(self.month)),
            Column::DayOfWeek => Some(Value::Weekday(self.day_of_week)),
            Column::StartHour => Some(Value::Int64(i64::from(self.start_hour))),
        }
    }
}

/// In-memory, ordered collection of trip records from one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCollection {
    schema: TripSchema,
    records: Vec<TripRecord>,
}

impl RecordCollection {
    pub fn new(schema: TripSchema, records: Vec<TripRecord>) -> Self {
        Self { schema, records }
    }

    /// An empty collection with the given schema.
    pub fn empty(schema: TripSchema) -> Self {
        Self::new(schema, Vec::new())
    }

    pub fn schema(&self) -> TripSchema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    /// Returns `true` if the dataset can carry `column` (see [`TripSchema::has`]).
    pub fn has_column(&self, column: Column) -> bool {
        self.schema.has(column)
    }

    /// Create a new collection containing only records that match `predicate`.
    ///
    /// Order and schema are preserved; `self` is left untouched.
    pub fn filter_records<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&TripRecord) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        Self {
            schema: self.schema,
            records,
        }
    }

    pub fn into_records(self) -> Vec<TripRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
