//! `folder-consolidator` walks the immediate subdirectories of a landing root and
//! consolidates each one's raw files into a single gzip-compressed newline-delimited
//! JSON artifact named `<folder>.json.gz`.
//!
//! The primary entrypoint is [`consolidate::consolidate_root`], which enumerates the
//! landing root and invokes [`consolidate::consolidate_folder`] once per subdirectory,
//! sequentially, with a per-folder failure boundary so one bad folder never blocks the
//! rest of the run.
//!
//! ## What gets consolidated
//!
//! **File formats (detected by extension, case-insensitive):**
//!
//! - **CSV**: `.csv` — header row names the fields; values stay strings
//! - **JSON**: `.json` — array-of-objects or newline-delimited objects, distinguished
//!   by the file's first non-whitespace byte
//!
//! Any other extension is skipped and recorded in the skip log (one line per file, via
//! [`observability::SkipLogObserver`]). Undecodable NDJSON lines are discarded and
//! counted, never fatal.
//!
//! **Records:**
//!
//! Each decoded row/object becomes one [`types::Record`] and is written as one compact
//! JSON line. Readers are lazy: peak memory is bounded by one record (one batch under
//! [`readers::ReadStrategy::Batched`]), not by file size. The one exception is JSON
//! array mode, which parses the whole array before yielding elements.
//!
//! ## Quick example: consolidate a landing root
//!
//! ```no_run
//! use folder_consolidator::consolidate::{consolidate_root, ConsolidateOptions};
//!
//! # fn main() -> Result<(), folder_consolidator::ConsolidateError> {
//! // Every subdirectory of ./raw_data becomes ./processed_data/<name>.json.gz.
//! let report = consolidate_root("./raw_data", "./processed_data", &ConsolidateOptions::default())?;
//! for folder in &report.folders {
//!     println!(
//!         "{}: {} records ({} skipped, {} discarded)",
//!         folder.folder.display(),
//!         folder.records_written,
//!         folder.files_skipped,
//!         folder.lines_discarded
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading records from one file
//!
//! ```no_run
//! use folder_consolidator::readers::{open_records, ReaderOptions};
//!
//! # fn main() -> Result<(), folder_consolidator::ConsolidateError> {
//! if let Some(reader) = open_records("raw_data/orders/2024-01.csv", &ReaderOptions::default())? {
//!     for record in reader {
//!         let record = record?;
//!         println!("{}", serde_json::Value::Object(record));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`consolidate`]: per-folder consolidation, the top-level driver, and the gzip sink
//! - [`readers`]: format detection and lazy CSV/JSON record readers
//! - [`observability`]: observer trait, skip log, and stderr diagnostics
//! - [`types`]: record type and directory-layout conventions
//! - [`error`]: error types used across the crate

pub mod consolidate;
pub mod error;
pub mod observability;
pub mod readers;
pub mod types;

pub use error::{ConsolidateError, ConsolidateResult};
