//! folder-consolidator CLI: consolidates landing-root subfolders into gzip NDJSON
//! artifacts, one per subfolder, with a skip log for unrecognized files.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use folder_consolidator::consolidate::{ConsolidateOptions, consolidate_root};
use folder_consolidator::observability::{
    CompositeObserver, ConsolidateObserver, SkipLogObserver, StdErrObserver,
};
use folder_consolidator::readers::{ReadStrategy, ReaderOptions};
use folder_consolidator::types::DataRoots;

/// Consolidate subfolders of raw CSV/JSON files into per-folder NDJSON.gz artifacts.
#[derive(Parser, Debug)]
#[command(name = "folder-consolidator")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landing root holding one subdirectory per dataset.
    #[arg(long, default_value = "./raw_data")]
    raw_dir: PathBuf,

    /// Output directory for consolidated artifacts.
    #[arg(long, default_value = "./processed_data")]
    processed_dir: PathBuf,

    /// Directory for the skip log.
    #[arg(long, default_value = "./logs")]
    log_dir: PathBuf,

    /// Record read strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Streaming)]
    strategy: StrategyArg,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Decode one record per pull.
    Streaming,
    /// Prefetch bounded chunks of records.
    Batched,
}

impl From<StrategyArg> for ReadStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Streaming => Self::Streaming,
            StrategyArg::Batched => Self::Batched,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let roots = DataRoots::new(&args.raw_dir, &args.processed_dir, &args.log_dir);
    if let Err(e) = std::fs::create_dir_all(&roots.logs) {
        eprintln!("failed to create log directory {}: {e}", roots.logs.display());
        return ExitCode::FAILURE;
    }

    let observer: Arc<dyn ConsolidateObserver> = Arc::new(CompositeObserver::new(vec![
        Arc::new(SkipLogObserver::new(roots.skip_log_path())),
        Arc::new(StdErrObserver),
    ]));

    let options = ConsolidateOptions {
        reader: ReaderOptions {
            strategy: args.strategy.into(),
            ..Default::default()
        },
        observer: Some(observer),
        ..Default::default()
    };

    info!(
        "consolidating {} -> {}",
        roots.raw.display(),
        roots.processed.display()
    );

    match consolidate_root(&roots.raw, &roots.processed, &options) {
        Ok(report) => {
            info!(
                folders = report.folders.len(),
                failed = report.failed_folders.len(),
                records = report.records_written(),
                "run complete"
            );
            if report.failed_folders.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("consolidation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
