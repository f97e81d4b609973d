use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for consolidation operations.
pub type ConsolidateResult<T> = Result<T, ConsolidateError>;

/// Error type returned by readers, sinks, and the consolidator.
///
/// This is a single error enum shared across CSV/JSON reading and gzip NDJSON writing.
#[derive(Debug, Error)]
pub enum ConsolidateError {
    /// Underlying I/O error (e.g. file not found, permission denied, disk full).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error (including malformed rows surfaced by the parser).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error while writing a record to a sink.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON file in array mode could not be parsed as an array of values.
    #[error("invalid json array in {}: {source}", path.display())]
    JsonArray {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A path expected to be a directory is not one.
    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
}
