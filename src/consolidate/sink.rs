//! Gzip-compressed NDJSON sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::error::ConsolidateResult;
use crate::types::Record;

/// Writes records as compact JSON lines into a gzip-compressed file.
///
/// The target file is truncated on creation and stays open for the sink's lifetime.
/// [`finish`](Self::finish) flushes buffers and writes the gzip trailer; dropping an
/// unfinished sink leaves a truncated artifact that must be regenerated from scratch.
pub struct GzipNdjsonSink {
    encoder: GzEncoder<BufWriter<File>>,
    records_written: u64,
}

impl GzipNdjsonSink {
    /// Create (or truncate) the artifact at `path`.
    pub fn create(path: impl AsRef<Path>) -> ConsolidateResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            encoder: GzEncoder::new(BufWriter::new(file), Compression::default()),
            records_written: 0,
        })
    }

    /// Serialize one record as compact JSON followed by a single newline.
    pub fn write_record(&mut self, record: &Record) -> ConsolidateResult<()> {
        serde_json::to_writer(&mut self.encoder, record)?;
        self.encoder.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flush all buffers and write the gzip trailer.
    pub fn finish(self) -> ConsolidateResult<()> {
        let mut inner = self.encoder.finish()?;
        inner.flush()?;
        Ok(())
    }
}
