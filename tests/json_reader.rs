use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use folder_consolidator::ConsolidateError;
use folder_consolidator::readers::json::JsonRecordIter;
use folder_consolidator::readers::{ReadStrategy, ReaderOptions, SourceFormat, open_records};
use folder_consolidator::types::Record;

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("folder-consolidator-json-{nanos}.{ext}"))
}

fn drain(iter: &mut JsonRecordIter) -> Vec<Record> {
    iter.map(|r| r.unwrap()).collect()
}

#[test]
fn array_mode_yields_each_element() {
    let mut iter =
        JsonRecordIter::open("tests/fixtures/people.json", &ReaderOptions::default()).unwrap();
    let records = drain(&mut iter);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], serde_json::json!("Ada"));
    assert_eq!(records[1]["id"], serde_json::json!(2));
    assert_eq!(iter.lines_discarded(), 0);
}

#[test]
fn newline_delimited_mode_yields_each_line() {
    let path = tmp_file("json");
    fs::write(&path, "{\"x\":1}\n{\"x\":2}\n").unwrap();

    let mut iter = JsonRecordIter::open(&path, &ReaderOptions::default()).unwrap();
    let records = drain(&mut iter);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["x"], serde_json::json!(1));
    assert_eq!(records[1]["x"], serde_json::json!(2));

    fs::remove_file(&path).unwrap();
}

#[test]
fn array_mode_detected_despite_leading_whitespace() {
    let path = tmp_file("json");
    fs::write(&path, "  \n\t [ {\"x\":1} ]").unwrap();

    let mut iter = JsonRecordIter::open(&path, &ReaderOptions::default()).unwrap();
    assert_eq!(drain(&mut iter).len(), 1);

    fs::remove_file(&path).unwrap();
}

#[test]
fn malformed_line_is_discarded_and_counted() {
    let mut iter =
        JsonRecordIter::open("tests/fixtures/events.json", &ReaderOptions::default()).unwrap();
    let records = drain(&mut iter);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["kind"], serde_json::json!("login"));
    assert_eq!(records[1]["kind"], serde_json::json!("logout"));
    assert_eq!(iter.lines_discarded(), 1);
}

#[test]
fn blank_lines_are_skipped_without_counting() {
    let path = tmp_file("json");
    fs::write(&path, "\n{\"x\":1}\n\n   \n{\"x\":2}\n\n").unwrap();

    let mut iter = JsonRecordIter::open(&path, &ReaderOptions::default()).unwrap();
    assert_eq!(drain(&mut iter).len(), 2);
    assert_eq!(iter.lines_discarded(), 0);

    fs::remove_file(&path).unwrap();
}

#[test]
fn non_object_lines_count_as_discarded() {
    let path = tmp_file("json");
    fs::write(&path, "42\n{\"x\":1}\n\"str\"\n").unwrap();

    let mut iter = JsonRecordIter::open(&path, &ReaderOptions::default()).unwrap();
    assert_eq!(drain(&mut iter).len(), 1);
    assert_eq!(iter.lines_discarded(), 2);

    fs::remove_file(&path).unwrap();
}

#[test]
fn batched_strategy_yields_same_records_as_streaming() {
    let path = tmp_file("json");
    let mut body = String::new();
    for i in 0..3000 {
        body.push_str(&format!("{{\"i\":{i}}}\n"));
    }
    fs::write(&path, body).unwrap();

    let mut streaming = JsonRecordIter::open(&path, &ReaderOptions::default()).unwrap();
    let mut batched = JsonRecordIter::open(
        &path,
        &ReaderOptions {
            strategy: ReadStrategy::Batched,
            batch_size: 256,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(drain(&mut streaming), drain(&mut batched));

    fs::remove_file(&path).unwrap();
}

#[test]
fn empty_file_yields_no_records() {
    let path = tmp_file("json");
    fs::write(&path, "").unwrap();

    let mut iter = JsonRecordIter::open(&path, &ReaderOptions::default()).unwrap();
    assert!(drain(&mut iter).is_empty());

    fs::remove_file(&path).unwrap();
}

#[test]
fn truncated_array_fails_at_open() {
    let path = tmp_file("json");
    fs::write(&path, "[{\"x\":1},").unwrap();

    let err = JsonRecordIter::open(&path, &ReaderOptions::default()).unwrap_err();
    assert!(matches!(err, ConsolidateError::JsonArray { .. }));

    fs::remove_file(&path).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
    let err = open_records(
        "tests/fixtures/does_not_exist.json",
        &ReaderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ConsolidateError::Io(_)));
}

#[test]
fn unsupported_extension_is_not_an_error() {
    // Detection happens before any open, so the path does not need to exist.
    let reader =
        open_records("no-such-dir/notes.txt", &ReaderOptions::default()).unwrap();
    assert!(reader.is_none());
}

#[test]
fn extension_detection_is_case_insensitive() {
    assert_eq!(SourceFormat::from_extension("CSV"), Some(SourceFormat::Csv));
    assert_eq!(
        SourceFormat::from_extension("Json"),
        Some(SourceFormat::Json)
    );
    assert_eq!(SourceFormat::from_extension("txt"), None);
    assert_eq!(SourceFormat::from_extension("ndjson"), None);
    assert_eq!(SourceFormat::from_path("a/b/data.PARQUET"), None);
}
