//! Cursor-driven, fixed-size batches over a record collection.

use crate::types::{RecordCollection, TripRecord};

/// Records per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// One page of raw records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Batch<'a> {
    /// Position of the first record of the batch within the collection.
    pub offset: usize,
    pub records: &'a [TripRecord],
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read-only pager over a [`RecordCollection`].
///
/// Each [`RawDataPager::next_batch`] call returns the next up-to-`batch_size` records and
/// advances the cursor. Once the collection is exhausted every further call returns an empty
/// batch; the cursor never wraps around or resets.
#[derive(Debug, Clone)]
pub struct RawDataPager<'a> {
    records: &'a [TripRecord],
    cursor: usize,
    batch_size: usize,
}

impl<'a> RawDataPager<'a> {
    /// Pager with [`DEFAULT_BATCH_SIZE`].
    pub fn new(collection: &'a RecordCollection) -> Self {
        Self::with_batch_size(collection, DEFAULT_BATCH_SIZE)
    }

    /// # Panics
    ///
    /// Panics if `batch_size == 0`.
    pub fn with_batch_size(collection: &'a RecordCollection, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch_size must be > 0");
        Self {
            records: collection.records(),
            cursor: 0,
            batch_size,
        }
    }

    pub fn next_batch(&mut self) -> Batch<'a> {
        let start = self.cursor;
        let end = start.saturating_add(self.batch_size).min(self.records.len());
        self.cursor = end;
        Batch {
            offset: start,
            records: &self.records[start..end],
        }
    }

    /// Index of the next record to be returned.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn remaining(&self) -> usize {
        self.records.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{RawDataPager, DEFAULT_BATCH_SIZE};
    use crate::types::{RecordCollection, TripRecord, TripSchema};
    use chrono::NaiveDate;

    fn collection_of(n: usize) -> RecordCollection {
        let start = NaiveDate::from_ymd_opt(2017, 3, 6)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let records = (0..n)
            .map(|i| TripRecord::new(start, format!("s{i}"), "end", i as f64, "Subscriber"))
            .collect();
        RecordCollection::new(TripSchema::required_only(), records)
    }

    #[test]
    fn twelve_records_page_as_5_5_2_then_empty() {
        let ds = collection_of(12);
        let mut pager = RawDataPager::new(&ds);
        assert_eq!(pager.batch_size(), DEFAULT_BATCH_SIZE);

        let sizes: Vec<usize> = (0..6).map(|_| pager.next_batch().len()).collect();
        assert_eq!(sizes, vec![5, 5, 2, 0, 0, 0]);
        assert!(pager.is_exhausted());
        assert_eq!(pager.cursor(), 12);
    }

    #[test]
    fn batches_cover_every_record_once_in_order() {
        let ds = collection_of(12);
        let mut pager = RawDataPager::new(&ds);
        let mut seen = Vec::new();
        loop {
            let batch = pager.next_batch();
            if batch.is_empty() {
                break;
            }
            assert_eq!(batch.offset, seen.len());
            seen.extend(batch.records.iter().map(|r| r.start_station().to_string()));
        }
        let expected: Vec<String> = (0..12).map(|i| format!("s{i}")).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn empty_collection_is_immediately_exhausted() {
        let ds = collection_of(0);
        let mut pager = RawDataPager::new(&ds);
        assert!(pager.is_exhausted());
        assert!(pager.next_batch().is_empty());
        assert_eq!(pager.cursor(), 0);
    }

    #[test]
    fn custom_batch_size() {
        let ds = collection_of(7);
        let mut pager = RawDataPager::with_batch_size(&ds, 3);
        assert_eq!(pager.next_batch().len(), 3);
        assert_eq!(pager.remaining(), 4);
        assert_eq!(pager.next_batch().len(), 3);
        assert_eq!(pager.next_batch().len(), 1);
        assert_eq!(pager.next_batch().len(), 0);
    }

    #[test]
    #[should_panic(expected = "batch_size must be > 0")]
    fn zero_batch_size_panics() {
        let ds = collection_of(1);
        let _ = RawDataPager::with_batch_size(&ds, 0);
    }
}
