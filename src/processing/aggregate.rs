//! Descriptive statistics over a [`crate::types::RecordCollection`].
//!
//! Every operation is a single pass over the records and reports an absent answer as
//! [`AggregateResult::NoData`] (nothing to compute over) or [`AggregateResult::NotAvailable`]
//! (the dataset does not carry the column) instead of failing.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::types::{Column, RecordCollection, Value};

/// Outcome of one statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum AggregateResult<T> {
    /// A concrete answer.
    Value(T),
    /// The collection is empty, or every value in the column is missing.
    NoData,
    /// The dataset has no such column (e.g. Gender for Washington).
    NotAvailable(Column),
}

impl<T> AggregateResult<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            AggregateResult::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            AggregateResult::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, AggregateResult::NoData)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AggregateResult<U> {
        match self {
            AggregateResult::Value(v) => AggregateResult::Value(f(v)),
            AggregateResult::NoData => AggregateResult::NoData,
            AggregateResult::NotAvailable(c) => AggregateResult::NotAvailable(c),
        }
    }
}

impl<T> From<Option<T>> for AggregateResult<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(AggregateResult::NoData, AggregateResult::Value)
    }
}

/// A value together with how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counted<T> {
    pub value: T,
    pub count: usize,
}

/// Minimum, maximum and arithmetic mean of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremes {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Most frequent non-missing value of `column`.
///
/// Ties go to the value whose first occurrence comes earliest in the collection.
pub fn mode(records: &RecordCollection, column: Column) -> AggregateResult<Counted<Value>> {
    if !records.has_column(column) {
        return AggregateResult::NotAvailable(column);
    }
    most_frequent(tally(records.iter().filter_map(|r| r.value(column)))).into()
}

/// Every non-missing value of `column` with its count, most frequent first.
///
/// Values with equal counts keep first-occurrence order.
pub fn value_counts(records: &RecordCollection, column: Column) -> AggregateResult<Vec<Counted<Value>>> {
    if !records.has_column(column) {
        return AggregateResult::NotAvailable(column);
    }
    let mut counts = tally(records.iter().filter_map(|r| r.value(column)));
    if counts.is_empty() {
        return AggregateResult::NoData;
    }
    // Stable sort: ties stay in first-occurrence order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    AggregateResult::Value(counts)
}

/// Min, max and mean of a numeric column, ignoring missing (and non-numeric) values.
pub fn extremes_and_mean(records: &RecordCollection, column: Column) -> AggregateResult<Extremes> {
    if !records.has_column(column) {
        return AggregateResult::NotAvailable(column);
    }

    let mut n = 0usize;
    let mut sum = 0.0f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in records.iter().filter_map(|r| r.value(column)).filter_map(|v| v.as_f64()) {
        n += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }

    if n == 0 {
        return AggregateResult::NoData;
    }
    AggregateResult::Value(Extremes {
        min,
        max,
        mean: sum / n as f64,
    })
}

/// Sum of a numeric column. Missing values contribute nothing.
///
/// An empty collection is [`AggregateResult::NoData`]; a non-empty one whose values are all
/// missing sums to `0.0`.
pub fn sum(records: &RecordCollection, column: Column) -> AggregateResult<f64> {
    if !records.has_column(column) {
        return AggregateResult::NotAvailable(column);
    }
    if records.is_empty() {
        return AggregateResult::NoData;
    }
    AggregateResult::Value(
        records
            .iter()
            .filter_map(|r| r.value(column))
            .filter_map(|v| v.as_f64())
            .sum(),
    )
}

/// Most frequent `(a, b)` combination, e.g. start/end station.
///
/// Records missing either value are ignored. Ties are broken like [`mode`].
pub fn top_pair(
    records: &RecordCollection,
    column_a: Column,
    column_b: Column,
) -> AggregateResult<Counted<(Value, Value)>> {
    for column in [column_a, column_b] {
        if !records.has_column(column) {
            return AggregateResult::NotAvailable(column);
        }
    }
    let pairs = records
        .iter()
        .filter_map(|r| Some((r.value(column_a)?, r.value(column_b)?)));
    most_frequent(tally(pairs)).into()
}

/// Count keys, keeping first-occurrence order.
fn tally<K, I>(keys: I) -> Vec<Counted<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<Counted<K>> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push(Counted { value: key, count: 1 });
            }
        }
    }
    counts
}

/// First entry with the highest count. `counts` must be in first-occurrence order.
fn most_frequent<K>(counts: Vec<Counted<K>>) -> Option<Counted<K>> {
    counts.into_iter().fold(None, |best, c| match best {
        Some(b) if b.count >= c.count => Some(b),
        _ => Some(c),
    })
}
