use bikeshare_stats::ingestion::json::{ingest_json_from_path, ingest_json_from_str};
use bikeshare_stats::types::{Column, TripSchema};
use bikeshare_stats::IngestionError;

#[test]
fn ingest_json_array_from_path_happy_path() {
    let outcome = ingest_json_from_path("tests/fixtures/new_york_city.json").unwrap();
    let ds = &outcome.collection;

    assert_eq!(outcome.loaded(), 3);
    assert!(outcome.skipped.is_empty());
    assert_eq!(ds.schema(), TripSchema::full());

    assert_eq!(ds.records()[0].trip_duration(), 665.0);
    assert_eq!(ds.records()[0].birth_year(), Some(1992));
    assert_eq!(ds.records()[1].birth_year(), Some(1973));
    assert_eq!(ds.records()[1].gender(), Some("Male"));

    // Explicit nulls and absent keys are both missing values.
    let third = &ds.records()[2];
    assert_eq!(third.gender(), None);
    assert_eq!(third.birth_year(), None);
    assert_eq!(third.end_time(), None);
}

#[test]
fn ingest_json_ndjson_skips_bad_rows() {
    let outcome = ingest_json_from_path("tests/fixtures/trips.ndjson").unwrap();

    assert_eq!(outcome.loaded(), 2);
    assert_eq!(outcome.collection.schema(), TripSchema::required_only());
    assert_eq!(outcome.collection.records()[1].trip_duration(), 30.5);
    assert!(matches!(
        &outcome.skipped[..],
        [IngestionError::ParseError { row: 2, column, .. }] if column == "Trip Duration"
    ));
}

#[test]
fn ingest_json_single_object() {
    let input = r#"{"Start Time":"2017-06-05 08:00:00","Trip Duration":60,"Start Station":"A","End Station":"B","User Type":"Subscriber","Gender":"Female"}"#;
    let outcome = ingest_json_from_str(input).unwrap();
    assert_eq!(outcome.loaded(), 1);
    assert!(outcome.collection.has_column(Column::Gender));
    assert!(!outcome.collection.has_column(Column::BirthYear));
    assert_eq!(outcome.collection.records()[0].gender(), Some("Female"));
}

#[test]
fn ingest_json_errors_on_missing_field() {
    let input = r#"[{"Start Time":"2017-06-05 08:00:00","Trip Duration":60,"Start Station":"A","End Station":"B"}]"#;
    let err = ingest_json_from_str(input).unwrap_err();
    match err {
        IngestionError::SchemaMismatch { message } => {
            assert!(message.contains("missing required field 'User Type'"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ingest_json_rejects_non_object_rows() {
    let input = r#"
{"Start Time":"2017-06-05 08:00:00","Trip Duration":60,"Start Station":"A","End Station":"B","User Type":"Subscriber"}
[1, 2, 3]
{"Start Time":"2017-06-06 08:00:00","Trip Duration":90,"Start Station":"B","End Station":"A","User Type":"Customer"}
"#;
    let outcome = ingest_json_from_str(input).unwrap();
    assert_eq!(outcome.loaded(), 2);
    assert!(matches!(
        &outcome.skipped[..],
        [IngestionError::ParseError { row: 2, column, .. }] if column == "<record>"
    ));
}

#[test]
fn ingest_json_errors_on_empty_input() {
    let err = ingest_json_from_str("  \n ").unwrap_err();
    assert!(matches!(err, IngestionError::SchemaMismatch { .. }));
}
