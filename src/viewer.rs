//! Paged view over the raw lines of a city's unfiltered trip file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DataError;

/// One page of raw rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub rows: Vec<String>,
    /// True once the end of the file has been reached.
    pub exhausted: bool,
}

/// Read cursor over a trip file. Each [`next_batch`](Self::next_batch)
/// continues after the last row handed out by the previous one.
///
/// Rows are physical lines, so a quoted field holding a newline spans two rows.
pub struct RawRowViewer<R> {
    reader: R,
    path: PathBuf,
    emitted: u64,
    exhausted: bool,
}

impl RawRowViewer<BufReader<File>> {
    /// Opens `path` and skips its header line.
    pub fn open(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }
}

impl<R: BufRead> RawRowViewer<R> {
    pub fn from_reader(reader: R, path: &Path) -> Result<Self, DataError> {
        let mut viewer = RawRowViewer {
            reader,
            path: path.to_path_buf(),
            emitted: 0,
            exhausted: false,
        };
        // header
        viewer.read_line()?;
        Ok(viewer)
    }

    /// Returns up to `n` further data rows, verbatim minus line terminators.
    pub fn next_batch(&mut self, n: usize) -> Result<Batch, DataError> {
        let mut rows = Vec::with_capacity(n);
        while rows.len() < n {
            match self.read_line()? {
                Some(line) => rows.push(line),
                None => break,
            }
        }
        if !self.exhausted && self.at_eof()? {
            self.exhausted = true;
        }
        self.emitted += rows.len() as u64;
        debug!(
            rows = rows.len(),
            emitted = self.emitted,
            exhausted = self.exhausted,
            "Raw batch read"
        );

        Ok(Batch {
            rows,
            exhausted: self.exhausted,
        })
    }

    pub fn rows_emitted(&self) -> u64 {
        self.emitted
    }

    fn at_eof(&mut self) -> Result<bool, DataError> {
        let buf = self.reader.fill_buf().map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(buf.is_empty())
    }

    fn read_line(&mut self) -> Result<Option<String>, DataError> {
        if self.exhausted {
            return Ok(None);
        }
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        if read == 0 {
            self.exhausted = true;
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
