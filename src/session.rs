//! One inspection session: a city's trip log loaded once and narrowed by a [`FilterCriteria`].

use crate::config::DatasetConfig;
use crate::error::{IngestionError, IngestionResult};
use crate::execution::{StatsEngine, TripReport};
use crate::ingestion::{ingest_city, IngestionOptions, LoadOutcome};
use crate::processing::{by_criteria, RawDataPager};
use crate::types::{FilterCriteria, RecordCollection};

/// Immutable snapshot of a loaded dataset and the records the criteria keep.
#[derive(Debug)]
pub struct Session {
    criteria: FilterCriteria,
    full: RecordCollection,
    filtered: RecordCollection,
    skipped: Vec<IngestionError>,
}

impl Session {
    /// Load the trip log of `criteria.city` and apply the month/day restriction.
    pub fn open(
        criteria: FilterCriteria,
        config: &DatasetConfig,
        options: &IngestionOptions,
    ) -> IngestionResult<Self> {
        let outcome = ingest_city(criteria.city, config, options)?;
        Ok(Self::from_outcome(criteria, outcome))
    }

    pub fn from_outcome(criteria: FilterCriteria, outcome: LoadOutcome) -> Self {
        let mut session = Self::from_collection(criteria, outcome.collection);
        session.skipped = outcome.skipped;
        session
    }

    pub fn from_collection(criteria: FilterCriteria, full: RecordCollection) -> Self {
        let filtered = by_criteria(&full, &criteria);
        Self {
            criteria,
            full,
            filtered,
            skipped: Vec::new(),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Every record of the dataset.
    pub fn full(&self) -> &RecordCollection {
        &self.full
    }

    /// Records matching the criteria.
    pub fn filtered(&self) -> &RecordCollection {
        &self.filtered
    }

    /// Rows dropped at load time because they failed to parse.
    pub fn skipped(&self) -> &[IngestionError] {
        &self.skipped
    }

    pub fn report(&self, engine: &StatsEngine) -> TripReport {
        engine.summarize(&self.filtered, &self.criteria)
    }

    /// A fresh pager over the filtered records, starting at the first one.
    pub fn pager(&self) -> RawDataPager<'_> {
        RawDataPager::new(&self.filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::execution::StatsEngine;
    use crate::types::{City, FilterCriteria, Month, RecordCollection, Selection, TripRecord, TripSchema};
    use chrono::NaiveDate;

    fn trip(m: u32, d: u32) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(2017, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        TripRecord::new(start, "A", "B", 30.0, "Customer")
    }

    #[test]
    fn session_keeps_full_and_filtered_views() {
        let full = RecordCollection::new(
            TripSchema::full(),
            (1..=7).map(|d| trip(6, d)).chain((1..=3).map(|d| trip(2, d))).collect(),
        );
        let criteria = FilterCriteria::new(City::Chicago, Selection::Only(Month::June), Selection::All);
        let session = Session::from_collection(criteria, full);

        assert_eq!(session.full().len(), 10);
        assert_eq!(session.filtered().len(), 7);
        assert!(session.skipped().is_empty());

        let report = session.report(&StatsEngine::sequential());
        assert_eq!(report.rows, 7);

        let mut pager = session.pager();
        assert_eq!(pager.next_batch().len(), 5);
        assert_eq!(pager.next_batch().len(), 2);
        assert!(pager.next_batch().is_empty());

        // Each inspection starts over.
        assert_eq!(session.pager().cursor(), 0);
    }
}
