//! CSV record reader.

use std::collections::VecDeque;
use std::fs::File;
use std::path::Path;

use serde_json::Value;

use crate::error::ConsolidateResult;
use crate::types::Record;

use super::{ReadStrategy, ReaderOptions};

/// Lazy iterator over the data rows of a CSV file.
///
/// Rules:
///
/// - The first row is the header; record keys are the header column names in header
///   order.
/// - Values are the raw field text as JSON strings; no type coercion is applied.
/// - Rows stream through the underlying `csv::Reader` one at a time (one bounded chunk
///   at a time under [`ReadStrategy::Batched`]), so peak memory is independent of file
///   size.
/// - A malformed row (e.g. column-count mismatch) surfaces whatever error the csv
///   parser yields; iteration stops after the first row error.
#[derive(Debug)]
pub struct CsvRecordIter {
    reader: ::csv::Reader<File>,
    headers: ::csv::StringRecord,
    strategy: ReadStrategy,
    batch_size: usize,
    buffered: VecDeque<ConsolidateResult<Record>>,
    done: bool,
}

impl CsvRecordIter {
    /// Open `path` and read its header row.
    pub fn open(path: impl AsRef<Path>, options: &ReaderOptions) -> ConsolidateResult<Self> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        let headers = reader.headers()?.clone();
        Ok(Self {
            reader,
            headers,
            strategy: options.strategy,
            batch_size: options.batch_size.max(1),
            buffered: VecDeque::new(),
            done: false,
        })
    }

    fn read_one(&mut self) -> Option<ConsolidateResult<Record>> {
        let mut raw = ::csv::StringRecord::new();
        match self.reader.read_record(&mut raw) {
            Ok(true) => Some(Ok(record_from_row(&self.headers, &raw))),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

impl Iterator for CsvRecordIter {
    type Item = ConsolidateResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.buffered.pop_front() {
            return Some(item);
        }
        if self.done {
            return None;
        }

        match self.strategy {
            ReadStrategy::Streaming => self.read_one(),
            ReadStrategy::Batched => {
                while self.buffered.len() < self.batch_size {
                    match self.read_one() {
                        Some(item) => self.buffered.push_back(item),
                        None => break,
                    }
                }
                self.buffered.pop_front()
            }
        }
    }
}

fn record_from_row(headers: &::csv::StringRecord, row: &::csv::StringRecord) -> Record {
    let mut record = Record::new();
    for (name, raw) in headers.iter().zip(row.iter()) {
        record.insert(name.to_string(), Value::String(raw.to_string()));
    }
    record
}
