//! Folder consolidation and the top-level driver.
//!
//! [`consolidate_folder`] turns one source folder into one gzip-compressed NDJSON
//! artifact. [`consolidate_root`] runs it over every immediate subdirectory of a
//! landing root, sequentially, isolating each folder's failures so one bad folder
//! never blocks the rest of the run.

mod sink;

pub use sink::GzipNdjsonSink;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{ConsolidateError, ConsolidateResult};
use crate::observability::ConsolidateObserver;
use crate::readers::{ReaderOptions, open_records};
use crate::types::DataRoots;

/// Options controlling a consolidation run.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct ConsolidateOptions {
    /// Options passed through to the record readers.
    pub reader: ReaderOptions,
    /// Sort directory entries by file name before processing.
    ///
    /// Directory enumeration order is otherwise host-dependent; sorting makes record
    /// order in artifacts reproducible across platforms.
    pub sort_entries: SortEntries,
    /// Optional observer for skip logging and progress diagnostics.
    pub observer: Option<Arc<dyn ConsolidateObserver>>,
}

/// Whether to sort directory entries by name (the default) or keep the host's native
/// listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortEntries {
    /// Sort by file name for reproducible artifacts.
    #[default]
    ByName,
    /// Use the host's native directory-listing order.
    Native,
}

impl fmt::Debug for ConsolidateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsolidateOptions")
            .field("reader", &self.reader)
            .field("sort_entries", &self.sort_entries)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

/// Outcome stats for one consolidated folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderReport {
    /// The source folder.
    pub folder: PathBuf,
    /// The artifact written for it.
    pub artifact: PathBuf,
    /// Records written to the artifact.
    pub records_written: u64,
    /// Files fully decoded.
    pub files_processed: usize,
    /// Files skipped for unrecognized extensions.
    pub files_skipped: usize,
    /// Files that could not be opened or stopped early on a read error.
    pub files_failed: usize,
    /// NDJSON lines (or array elements) discarded as undecodable.
    pub lines_discarded: u64,
}

/// Aggregated outcome of a full run over a landing root.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Per-folder reports, in processing order.
    pub folders: Vec<FolderReport>,
    /// Folders whose consolidation failed outright (artifact left truncated).
    pub failed_folders: Vec<PathBuf>,
}

impl RunReport {
    /// Total records written across all successful folders.
    pub fn records_written(&self) -> u64 {
        self.folders.iter().map(|f| f.records_written).sum()
    }
}

/// Consolidate one source folder into one artifact.
///
/// The artifact is truncated on open and held open for the whole folder; the gzip
/// trailer is written once every file is consumed. Per-file outcomes:
///
/// - unrecognized extension: reported via [`ConsolidateObserver::on_file_skipped`],
///   output untouched
/// - open/read failure: reported via [`ConsolidateObserver::on_file_failed`], file
///   contributes no further records, siblings continue
/// - undecodable NDJSON lines: discarded and counted in
///   [`FolderReport::lines_discarded`]
///
/// Errors writing the artifact itself (e.g. disk full) propagate and fail the folder.
pub fn consolidate_folder(
    folder: impl AsRef<Path>,
    artifact: impl AsRef<Path>,
    options: &ConsolidateOptions,
) -> ConsolidateResult<FolderReport> {
    let folder = folder.as_ref();
    let artifact = artifact.as_ref();

    if !folder.is_dir() {
        return Err(ConsolidateError::NotADirectory {
            path: folder.to_path_buf(),
        });
    }

    notify(options, |o| o.on_folder_started(folder));

    let mut sink = GzipNdjsonSink::create(artifact)?;
    let mut report = FolderReport {
        folder: folder.to_path_buf(),
        artifact: artifact.to_path_buf(),
        records_written: 0,
        files_processed: 0,
        files_skipped: 0,
        files_failed: 0,
        lines_discarded: 0,
    };

    for path in folder_files(folder, options.sort_entries)? {
        match open_records(&path, &options.reader) {
            Ok(Some(mut reader)) => {
                let mut failed = false;
                loop {
                    match reader.next() {
                        Some(Ok(record)) => sink.write_record(&record)?,
                        Some(Err(e)) => {
                            notify(options, |o| o.on_file_failed(&path, &e));
                            failed = true;
                            break;
                        }
                        None => break,
                    }
                }
                report.lines_discarded += reader.lines_discarded();
                if failed {
                    report.files_failed += 1;
                } else {
                    report.files_processed += 1;
                }
            }
            Ok(None) => {
                notify(options, |o| o.on_file_skipped(&path));
                report.files_skipped += 1;
            }
            Err(e) => {
                notify(options, |o| o.on_file_failed(&path, &e));
                report.files_failed += 1;
            }
        }
    }

    report.records_written = sink.records_written();
    sink.finish()?;

    notify(options, |o| o.on_folder_finished(&report));
    Ok(report)
}

/// Consolidate every immediate subdirectory of `raw_root` into `processed_root`.
///
/// Folders are processed sequentially. Each folder runs inside its own failure
/// boundary: a folder whose consolidation fails is reported (observer + log) and
/// recorded in [`RunReport::failed_folders`], and the run continues with the next
/// folder. The processed root is created if absent.
///
/// # Examples
///
/// ```no_run
/// use folder_consolidator::consolidate::{consolidate_root, ConsolidateOptions};
///
/// # fn main() -> Result<(), folder_consolidator::ConsolidateError> {
/// let report = consolidate_root("./raw_data", "./processed_data", &ConsolidateOptions::default())?;
/// println!("records={}", report.records_written());
/// # Ok(())
/// # }
/// ```
pub fn consolidate_root(
    raw_root: impl AsRef<Path>,
    processed_root: impl AsRef<Path>,
    options: &ConsolidateOptions,
) -> ConsolidateResult<RunReport> {
    let raw_root = raw_root.as_ref();
    let processed_root = processed_root.as_ref();

    if !raw_root.is_dir() {
        return Err(ConsolidateError::NotADirectory {
            path: raw_root.to_path_buf(),
        });
    }
    std::fs::create_dir_all(processed_root)?;

    let mut report = RunReport::default();
    for folder in subdirectories(raw_root, options.sort_entries)? {
        let name = folder
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let artifact = processed_root.join(DataRoots::artifact_file_name(&name));

        info!(folder = %folder.display(), "consolidating folder");
        match consolidate_folder(&folder, &artifact, options) {
            Ok(folder_report) => {
                info!(
                    folder = %folder.display(),
                    records = folder_report.records_written,
                    skipped = folder_report.files_skipped,
                    discarded = folder_report.lines_discarded,
                    "folder consolidated"
                );
                report.folders.push(folder_report);
            }
            Err(e) => {
                warn!(folder = %folder.display(), error = %e, "folder consolidation failed, continuing");
                notify(options, |o| o.on_folder_failed(&folder, &e));
                report.failed_folders.push(folder);
            }
        }
    }
    Ok(report)
}

fn notify(options: &ConsolidateOptions, f: impl FnOnce(&dyn ConsolidateObserver)) {
    if let Some(obs) = options.observer.as_ref() {
        f(obs.as_ref());
    }
}

/// Regular files directly inside `folder`.
fn folder_files(folder: &Path, sort: SortEntries) -> ConsolidateResult<Vec<PathBuf>> {
    walk_level(folder, sort, |entry| entry.file_type().is_file())
}

/// Directories directly inside `root`.
fn subdirectories(root: &Path, sort: SortEntries) -> ConsolidateResult<Vec<PathBuf>> {
    walk_level(root, sort, |entry| entry.file_type().is_dir())
}

fn walk_level(
    root: &Path,
    sort: SortEntries,
    keep: impl Fn(&walkdir::DirEntry) -> bool,
) -> ConsolidateResult<Vec<PathBuf>> {
    let mut walker = WalkDir::new(root).min_depth(1).max_depth(1);
    if sort == SortEntries::ByName {
        walker = walker.sort_by_file_name();
    }

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if keep(&entry) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}
