//! Record readers and format detection.
//!
//! Most callers should use [`open_records`], which:
//!
//! - detects the source format from the file extension (or you can force a format via
//!   [`ReaderOptions`])
//! - returns a lazy [`RecordReader`] over the file's records, or `None` when the
//!   extension is not recognized (the caller records the skip and moves on)
//!
//! Format-specific readers are also available under:
//! - [`csv`]
//! - [`json`]

pub mod csv;
pub mod json;

use std::path::Path;

use crate::error::ConsolidateResult;
use crate::types::Record;

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect a source format from a path's extension.
    ///
    /// Returns `None` for unrecognized or missing extensions; detection never fails.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }
}

/// How records are pulled from a source file.
///
/// Both strategies bound peak memory independently of file size; `Batched` amortizes
/// per-record dispatch by prefetching a bounded chunk of rows at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadStrategy {
    /// One record decoded per pull.
    #[default]
    Streaming,
    /// A bounded chunk of records decoded per pull.
    Batched,
}

/// Options controlling record readers.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// If `None`, detect format from the file extension.
    pub format: Option<SourceFormat>,
    /// Record pull strategy.
    pub strategy: ReadStrategy,
    /// Chunk size used by [`ReadStrategy::Batched`].
    pub batch_size: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            format: None,
            strategy: ReadStrategy::default(),
            batch_size: 1024,
        }
    }
}

/// A lazy record sequence over one source file.
#[derive(Debug)]
pub enum RecordReader {
    /// CSV data rows.
    Csv(csv::CsvRecordIter),
    /// JSON array elements or NDJSON lines.
    Json(json::JsonRecordIter),
}

impl RecordReader {
    /// Number of lines (or array elements) discarded so far because they failed to
    /// decode into a record. Always zero for CSV sources.
    pub fn lines_discarded(&self) -> u64 {
        match self {
            Self::Csv(_) => 0,
            Self::Json(r) => r.lines_discarded(),
        }
    }
}

impl Iterator for RecordReader {
    type Item = ConsolidateResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Csv(r) => r.next(),
            Self::Json(r) => r.next(),
        }
    }
}

/// Open a lazy record reader for `path`.
///
/// - If `options.format` is `None`, the format is detected from the file extension.
/// - An unrecognized extension yields `Ok(None)` rather than an error, so callers can
///   log the skip and continue with sibling files.
/// - A file that cannot be opened yields `Err`; the caller reports it and the file
///   contributes zero records.
///
/// # Examples
///
/// ```no_run
/// use folder_consolidator::readers::{open_records, ReaderOptions};
///
/// # fn main() -> Result<(), folder_consolidator::ConsolidateError> {
/// let Some(reader) = open_records("dataset/events.json", &ReaderOptions::default())? else {
///     eprintln!("unsupported extension");
///     return Ok(());
/// };
/// for record in reader {
///     let record = record?;
///     println!("{}", serde_json::Value::Object(record));
/// }
/// # Ok(())
/// # }
/// ```
pub fn open_records(
    path: impl AsRef<Path>,
    options: &ReaderOptions,
) -> ConsolidateResult<Option<RecordReader>> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => match SourceFormat::from_path(path) {
            Some(f) => f,
            None => return Ok(None),
        },
    };

    let reader = match format {
        SourceFormat::Csv => RecordReader::Csv(csv::CsvRecordIter::open(path, options)?),
        SourceFormat::Json => RecordReader::Json(json::JsonRecordIter::open(path, options)?),
    };
    Ok(Some(reader))
}
