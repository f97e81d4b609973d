//! Core data model types for consolidation.
//!
//! A [`Record`] is one decoded logical row/object from a source file. Records are
//! produced lazily by the readers in [`crate::readers`] and consumed immediately by the
//! sink; they are never retained beyond the current iteration step.

use std::path::{Path, PathBuf};

/// One decoded record: an ordered mapping from field name to JSON scalar.
///
/// The field set is not fixed across records or files; no schema is validated or
/// enforced. `serde_json` is built with `preserve_order`, so keys keep their source
/// order (CSV header order, JSON object key order).
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Directory conventions for a consolidation run.
///
/// Each immediate subdirectory of `raw` is one logical dataset; its consolidated
/// artifact lands in `processed` and the shared skip log lives under `logs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRoots {
    /// Landing root holding one subdirectory per dataset.
    pub raw: PathBuf,
    /// Output directory for consolidated artifacts.
    pub processed: PathBuf,
    /// Directory holding the skip log.
    pub logs: PathBuf,
}

impl DataRoots {
    /// Create roots from explicit paths.
    pub fn new(
        raw: impl AsRef<Path>,
        processed: impl AsRef<Path>,
        logs: impl AsRef<Path>,
    ) -> Self {
        Self {
            raw: raw.as_ref().to_path_buf(),
            processed: processed.as_ref().to_path_buf(),
            logs: logs.as_ref().to_path_buf(),
        }
    }

    /// Path of the shared append-only skip log.
    pub fn skip_log_path(&self) -> PathBuf {
        self.logs.join("skipped.log")
    }

    /// Artifact file name for a dataset folder name: `<name>.json.gz`.
    pub fn artifact_file_name(folder_name: &str) -> String {
        format!("{folder_name}.json.gz")
    }

    /// Artifact path for a dataset folder name: `<processed>/<name>.json.gz`.
    pub fn artifact_path(&self, folder_name: &str) -> PathBuf {
        self.processed.join(Self::artifact_file_name(folder_name))
    }
}

impl Default for DataRoots {
    fn default() -> Self {
        Self::new("./raw_data", "./processed_data", "./logs")
    }
}
