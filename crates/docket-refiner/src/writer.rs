//! Result writers

use docket_domain::traits::ResultSink;
use docket_domain::ResultRecord;
use serde::Serialize;
use std::convert::Infallible;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Failure to write the output file
#[derive(Error, Debug)]
#[error("Failed to write '{path}': {source}")]
pub struct WriteError {
    /// Output path
    pub path: String,
    /// Underlying I/O error
    pub source: io::Error,
}

/// Writes the batch as one JSON array to a file
///
/// Output is UTF-8 with non-ASCII characters left unescaped. Pretty output
/// uses four-space indentation. Missing parent directories are created.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileSink {
    /// Create a sink writing pretty JSON to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Toggle indentation
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_records(&self, records: &[ResultRecord]) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        if self.pretty {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
            records.serialize(&mut serializer)?;
        } else {
            serde_json::to_writer(&mut writer, records)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl ResultSink for JsonFileSink {
    type Error = WriteError;

    fn persist(&mut self, records: &[ResultRecord]) -> Result<(), Self::Error> {
        self.write_records(records).map_err(|source| WriteError {
            path: self.path.display().to_string(),
            source,
        })?;

        info!("Wrote {} records to '{}'", records.len(), self.path.display());
        Ok(())
    }
}

/// Keeps persisted batches in memory
///
/// Useful for tests and for callers that post-process records themselves.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    batches: Vec<Vec<ResultRecord>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of the most recent batch
    pub fn records(&self) -> &[ResultRecord] {
        self.batches.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of times a batch was persisted
    pub fn persist_count(&self) -> usize {
        self.batches.len()
    }
}

impl ResultSink for MemorySink {
    type Error = Infallible;

    fn persist(&mut self, records: &[ResultRecord]) -> Result<(), Self::Error> {
        self.batches.push(records.to_vec());
        Ok(())
    }
}
