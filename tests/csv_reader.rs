use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use folder_consolidator::readers::csv::CsvRecordIter;
use folder_consolidator::readers::{ReadStrategy, ReaderOptions};
use folder_consolidator::types::Record;

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("folder-consolidator-csv-{nanos}.{ext}"))
}

fn collect(iter: CsvRecordIter) -> Vec<Record> {
    iter.map(|r| r.unwrap()).collect()
}

#[test]
fn csv_rows_become_string_valued_records() {
    let records = collect(
        CsvRecordIter::open("tests/fixtures/people.csv", &ReaderOptions::default()).unwrap(),
    );

    assert_eq!(records.len(), 2);
    assert_eq!(
        serde_json::Value::Object(records[0].clone()).to_string(),
        r#"{"id":"1","name":"Ada","score":"98.5","active":"true"}"#
    );
    assert_eq!(records[1]["name"], serde_json::json!("Grace"));
}

#[test]
fn csv_record_keys_follow_header_order() {
    let records = collect(
        CsvRecordIter::open("tests/fixtures/people.csv", &ReaderOptions::default()).unwrap(),
    );

    let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "name", "score", "active"]);
}

#[test]
fn batched_strategy_yields_same_records_as_streaming() {
    let path = tmp_file("csv");
    let mut body = String::from("a,b\n");
    for i in 0..5000 {
        body.push_str(&format!("{i},row{i}\n"));
    }
    fs::write(&path, body).unwrap();

    let streaming = collect(CsvRecordIter::open(&path, &ReaderOptions::default()).unwrap());
    let batched = collect(
        CsvRecordIter::open(
            &path,
            &ReaderOptions {
                strategy: ReadStrategy::Batched,
                batch_size: 128,
                ..Default::default()
            },
        )
        .unwrap(),
    );

    assert_eq!(streaming.len(), 5000);
    assert_eq!(streaming, batched);

    fs::remove_file(&path).unwrap();
}

#[test]
fn ragged_row_surfaces_parser_error_and_stops() {
    let path = tmp_file("csv");
    fs::write(&path, "a,b,c\n1,2,3\n1,2\n4,5,6\n").unwrap();

    let mut iter = CsvRecordIter::open(&path, &ReaderOptions::default()).unwrap();
    assert!(iter.next().unwrap().is_ok());
    assert!(iter.next().unwrap().is_err());
    assert!(iter.next().is_none());

    fs::remove_file(&path).unwrap();
}

#[test]
fn header_only_csv_yields_no_records() {
    let path = tmp_file("csv");
    fs::write(&path, "a,b,c\n").unwrap();

    let records = collect(CsvRecordIter::open(&path, &ReaderOptions::default()).unwrap());
    assert!(records.is_empty());

    fs::remove_file(&path).unwrap();
}
