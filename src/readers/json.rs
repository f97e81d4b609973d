//! JSON record reader.
//!
//! Two file shapes are supported, distinguished by the file's first non-whitespace
//! byte:
//!
//! - `[` means **array mode**: a single JSON array of objects, e.g. `[{"a":1},{"a":2}]`
//! - anything else means **newline-delimited mode** (NDJSON): one object per line
//!
//! Array mode parses the whole array into memory before yielding elements lazily; this
//! is an acknowledged limit for very large arrays. Newline-delimited mode reads one
//! line at a time (one bounded chunk at a time under [`ReadStrategy::Batched`]). In
//! both modes, an element/line that does not decode into a JSON object is discarded
//! and counted (see [`JsonRecordIter::lines_discarded`]) rather than failing the file.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::vec;

use serde_json::Value;

use crate::error::{ConsolidateError, ConsolidateResult};
use crate::types::Record;

use super::{ReadStrategy, ReaderOptions};

#[derive(Debug)]
enum Mode {
    /// Whole array parsed up front; elements yielded one at a time.
    Array(vec::IntoIter<Value>),
    /// One line read and parsed per pull.
    NewlineDelimited(Lines<BufReader<File>>),
}

/// Lazy iterator over the records of a JSON file.
#[derive(Debug)]
pub struct JsonRecordIter {
    mode: Mode,
    strategy: ReadStrategy,
    batch_size: usize,
    buffered: VecDeque<ConsolidateResult<Record>>,
    discarded: u64,
}

impl JsonRecordIter {
    /// Open `path`, sniff its shape, and prepare a lazy record sequence.
    pub fn open(path: impl AsRef<Path>, options: &ReaderOptions) -> ConsolidateResult<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);

        let mode = if sniff_array(&mut reader)? {
            let values: Vec<Value> =
                serde_json::from_reader(reader).map_err(|source| ConsolidateError::JsonArray {
                    path: path.to_path_buf(),
                    source,
                })?;
            Mode::Array(values.into_iter())
        } else {
            Mode::NewlineDelimited(reader.lines())
        };

        Ok(Self {
            mode,
            strategy: options.strategy,
            batch_size: options.batch_size.max(1),
            buffered: VecDeque::new(),
            discarded: 0,
        })
    }

    /// Number of lines (or array elements) discarded because they failed to decode
    /// into a JSON object. Surfacing this count keeps dirty data visible without
    /// failing the file.
    pub fn lines_discarded(&self) -> u64 {
        self.discarded
    }

    /// Decode the next record, skipping blanks and counting undecodable input.
    fn read_one(&mut self) -> Option<ConsolidateResult<Record>> {
        loop {
            match &mut self.mode {
                Mode::Array(values) => match values.next()? {
                    Value::Object(map) => return Some(Ok(map)),
                    _ => self.discarded += 1,
                },
                Mode::NewlineDelimited(lines) => {
                    let line = match lines.next()? {
                        Ok(line) => line,
                        Err(e) => return Some(Err(e.into())),
                    };
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<Value>(trimmed) {
                        Ok(Value::Object(map)) => return Some(Ok(map)),
                        // Dirty line: dropped, but counted so the gap stays visible.
                        Ok(_) | Err(_) => self.discarded += 1,
                    }
                }
            }
        }
    }
}

impl Iterator for JsonRecordIter {
    type Item = ConsolidateResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.buffered.pop_front() {
            return Some(item);
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

/// Advance past leading whitespace and report whether the first meaningful byte is
/// `[`. The byte itself is not consumed, so a subsequent parse sees the full value.
fn sniff_array<R: BufRead>(reader: &mut R) -> std::io::Result<bool> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            // Empty (or all-whitespace) file: treat as newline-delimited with no lines.
            return Ok(false);
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(idx) => {
                let first = buf[idx];
                reader.consume(idx);
                return Ok(first == b'[');
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}
