use bikeshare_stats::config::DatasetConfig;
use bikeshare_stats::execution::{ExecutionOptions, StatsEngine};
use bikeshare_stats::ingestion::IngestionOptions;
use bikeshare_stats::processing::{
    by_day, by_month, extremes_and_mean, format_duration, mode, sum, top_pair, value_counts, AggregateResult,
    Counted,
};
use bikeshare_stats::session::Session;
use bikeshare_stats::types::{City, Column, FilterCriteria, Month, Selection, Value, Weekday};

fn fixtures() -> DatasetConfig {
    DatasetConfig::new("tests/fixtures").with_file(City::NewYorkCity, "new_york_city.json")
}

fn open(city: &str, month: &str, day: &str) -> Session {
    let criteria = FilterCriteria::parse(city, month, day).unwrap();
    Session::open(criteria, &fixtures(), &IngestionOptions::default()).unwrap()
}

fn utf8(s: &str) -> Value {
    Value::Utf8(s.to_string())
}

#[test]
fn chicago_june_mondays() {
    let session = open("Chicago", "June", "monday");
    assert_eq!(session.full().len(), 7);
    assert_eq!(session.skipped().len(), 1);
    assert_eq!(session.filtered().len(), 3);

    let report = session.report(&StatsEngine::new(ExecutionOptions::default()).unwrap());
    assert_eq!(report.rows, 3);
    assert_eq!(
        report.time.most_common_month,
        AggregateResult::Value(Counted { value: Value::Month(Month::June), count: 3 })
    );
    assert_eq!(
        report.time.most_common_start_hour,
        AggregateResult::Value(Counted { value: Value::Int64(8), count: 2 })
    );
    assert_eq!(
        report.stations.most_common_trip,
        AggregateResult::Value(Counted {
            value: (utf8("Clark St & Lake St"), utf8("State St & Randolph St")),
            count: 2
        })
    );
    assert_eq!(report.durations.total_seconds, AggregateResult::Value(1800.0));
    assert_eq!(report.durations.total_display, "30 minutes");
    assert_eq!(report.durations.mean_display, "10 minutes");
    assert_eq!(
        report.users.user_types,
        AggregateResult::Value(vec![Counted { value: utf8("Subscriber"), count: 3 }])
    );
}

#[test]
fn ties_go_to_the_first_occurrence() {
    let session = open("chicago", "all", "all");
    let ds = session.full();

    // Clark St and Canal St both start three trips; Clark St appears first.
    assert_eq!(
        mode(ds, Column::StartStation),
        AggregateResult::Value(Counted { value: utf8("Clark St & Lake St"), count: 3 })
    );
    assert_eq!(
        top_pair(ds, Column::StartStation, Column::EndStation),
        AggregateResult::Value(Counted {
            value: (utf8("Clark St & Lake St"), utf8("State St & Randolph St")),
            count: 2
        })
    );
    // Every birth year occurs once.
    assert_eq!(
        mode(ds, Column::BirthYear),
        AggregateResult::Value(Counted { value: Value::Int64(1985), count: 1 })
    );

    let genders = value_counts(ds, Column::Gender).into_value().unwrap();
    assert_eq!(
        genders,
        vec![
            Counted { value: utf8("Male"), count: 2 },
            Counted { value: utf8("Female"), count: 2 },
        ]
    );
}

#[test]
fn whole_dataset_durations_and_birth_years() {
    let session = open("chicago", "all", "all");
    let ds = session.full();

    assert_eq!(sum(ds, Column::TripDuration), AggregateResult::Value(6842.0));
    assert_eq!(format_duration(6842.0), "1 hour, 54 minutes, 2 seconds");

    let years = extremes_and_mean(ds, Column::BirthYear).into_value().unwrap();
    assert_eq!((years.min, years.max, years.mean), (1979.0, 2000.0, 1989.0));
}

#[test]
fn filters_compose_and_are_idempotent() {
    let session = open("chicago", "all", "all");
    let ds = session.full();

    let june = by_month(ds, Selection::Only(Month::June));
    assert_eq!(june.len(), 5);
    assert_eq!(by_month(&june, Selection::Only(Month::June)), june);
    assert!(june.iter().all(|r| r.month() == Month::June));

    let june_mondays = by_day(&june, Selection::Only(Weekday::Monday));
    assert_eq!(june_mondays.len(), 3);
    assert_eq!(by_day(ds, Selection::All), *ds);

    let june_total = sum(&june, Column::TripDuration).into_value().unwrap();
    assert_eq!(format_duration(june_total), "1 hour, 33 minutes, 1 second");
}

#[test]
fn empty_selection_is_no_data_not_an_error() {
    let session = open("washington", "january", "all");
    assert!(session.filtered().is_empty());

    let report = session.report(&StatsEngine::sequential());
    assert!(report.time.most_common_day.is_no_data());
    assert!(report.stations.most_common_start_station.is_no_data());
    assert!(report.durations.total_seconds.is_no_data());
    assert_eq!(report.durations.total_display, "");
    assert!(session.pager().next_batch().is_empty());
}

#[test]
fn washington_has_no_demographics() {
    let session = open("washington", "all", "all");
    let report = session.report(&StatsEngine::sequential());

    assert_eq!(report.users.genders, AggregateResult::NotAvailable(Column::Gender));
    assert_eq!(report.users.birth_years, AggregateResult::NotAvailable(Column::BirthYear));
    assert_eq!(
        report.time.most_common_day,
        AggregateResult::Value(Counted { value: Value::Weekday(Weekday::Wednesday), count: 2 })
    );
    assert_eq!(report.durations.total_display, "33 minutes, 27 seconds");

    let json = serde_json::to_value(&report.users.genders).unwrap();
    assert_eq!(json["status"], "not_available");
}

#[test]
fn new_york_city_from_json() {
    let session = open("new york city", "january", "sunday");
    assert_eq!(session.filtered().len(), 2);

    let report = session.report(&StatsEngine::sequential());
    assert_eq!(
        report.users.most_common_birth_year,
        AggregateResult::Value(Counted { value: Value::Int64(1992), count: 1 })
    );
}

#[test]
fn pager_walks_the_filtered_records_in_batches_of_five() {
    let session = open("chicago", "all", "all");
    let mut pager = session.pager();

    let first = pager.next_batch();
    assert_eq!((first.offset, first.len()), (0, 5));
    assert_eq!(first.records[0].trip_duration(), 600.0);

    let second = pager.next_batch();
    assert_eq!((second.offset, second.len()), (5, 2));
    assert_eq!(second.records[1].trip_duration(), 3661.0);

    assert!(pager.next_batch().is_empty());
    assert!(pager.is_exhausted());
}
