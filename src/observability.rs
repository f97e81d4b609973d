use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::consolidate::FolderReport;
use crate::error::ConsolidateError;

/// Observer interface for consolidation progress and diagnostics.
///
/// Implementors can record skip logs, progress lines, or metrics. All callbacks have
/// empty defaults, so implementors override only what they need.
pub trait ConsolidateObserver: Send + Sync {
    /// Called when a folder's consolidation begins.
    fn on_folder_started(&self, _folder: &Path) {}

    /// Called when a folder's consolidation completes.
    fn on_folder_finished(&self, _report: &FolderReport) {}

    /// Called when a folder's consolidation fails outright. The run continues with the
    /// next folder.
    fn on_folder_failed(&self, _folder: &Path, _error: &ConsolidateError) {}

    /// Called for each file skipped because its extension is not recognized.
    fn on_file_skipped(&self, _path: &Path) {}

    /// Called when a source file cannot be opened or read. The file contributes no
    /// further records; sibling files continue.
    fn on_file_failed(&self, _path: &Path, _error: &ConsolidateError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ConsolidateObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ConsolidateObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ConsolidateObserver for CompositeObserver {
    fn on_folder_started(&self, folder: &Path) {
        for o in &self.observers {
            o.on_folder_started(folder);
        }
    }

    fn on_folder_finished(&self, report: &FolderReport) {
        for o in &self.observers {
            o.on_folder_finished(report);
        }
    }

    fn on_folder_failed(&self, folder: &Path, error: &ConsolidateError) {
        for o in &self.observers {
            o.on_folder_failed(folder, error);
        }
    }

    fn on_file_skipped(&self, path: &Path) {
        for o in &self.observers {
            o.on_file_skipped(path);
        }
    }

    fn on_file_failed(&self, path: &Path, error: &ConsolidateError) {
        for o in &self.observers {
            o.on_file_failed(path, error);
        }
    }
}

/// Logs consolidation events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ConsolidateObserver for StdErrObserver {
    fn on_folder_started(&self, folder: &Path) {
        eprintln!("[consolidate] folder started: {}", folder.display());
    }

    fn on_folder_finished(&self, report: &FolderReport) {
        eprintln!(
            "[consolidate] folder done: {} records={} skipped={} failed={} discarded={}",
            report.folder.display(),
            report.records_written,
            report.files_skipped,
            report.files_failed,
            report.lines_discarded
        );
    }

    fn on_folder_failed(&self, folder: &Path, error: &ConsolidateError) {
        eprintln!(
            "[consolidate] folder failed: {} err={error}",
            folder.display()
        );
    }

    fn on_file_skipped(&self, path: &Path) {
        eprintln!(
            "[consolidate] skipped unsupported file: {}",
            path.display()
        );
    }

    fn on_file_failed(&self, path: &Path, error: &ConsolidateError) {
        eprintln!(
            "[consolidate] failed to read file: {} err={error}",
            path.display()
        );
    }
}

/// Appends one line per skipped file to the shared skip log.
///
/// Line format: `[SKIPPED] unsupported file format: <path>`.
#[derive(Debug)]
pub struct SkipLogObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SkipLogObserver {
    /// Create a skip-log observer that appends entries to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ConsolidateObserver for SkipLogObserver {
    fn on_file_skipped(&self, path: &Path) {
        self.append_line(&format!(
            "[SKIPPED] unsupported file format: {}",
            path.display()
        ));
    }
}
