/*!
 * Workload Parsers
 * CSV and JSON decoding into validated workloads
 */

use crate::core::errors::{SimError, SimResult};
use crate::process::{Workload, WorkloadRow};
use std::path::Path;
use tracing::debug;

/// Input format of a workload document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadFormat {
    Csv,
    Json,
}

impl WorkloadFormat {
    /// Anything not ending in `.csv` (case-insensitive) is treated as JSON
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        if filename.to_ascii_lowercase().ends_with(".csv") {
            Self::Csv
        } else {
            Self::Json
        }
    }
}

/// Parse a CSV document with a `pid,arrival,burst[,priority][,deadline]` header
///
/// Column order is free and unknown columns are ignored. Empty cells count
/// as missing values.
pub fn parse_csv(input: &str) -> SimResult<Workload> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let rows = reader
        .deserialize::<WorkloadRow>()
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = rows.len(), "Parsed CSV workload");
    Workload::from_rows(&rows)
}

/// Parse a JSON array of process objects
pub fn parse_json(input: &str) -> SimResult<Workload> {
    let rows: Vec<WorkloadRow> = serde_json::from_str(input)?;
    debug!(rows = rows.len(), "Parsed JSON workload");
    Workload::from_rows(&rows)
}

/// Parse an uploaded document, choosing the format from its file name
pub fn parse_upload(filename: &str, bytes: &[u8]) -> SimResult<Workload> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SimError::MalformedInput(format!("upload is not UTF-8: {}", e)))?;

    match WorkloadFormat::from_filename(filename) {
        WorkloadFormat::Csv => parse_csv(text),
        WorkloadFormat::Json => parse_json(text),
    }
}

/// Read and parse a workload file from disk
pub fn load_workload(path: impl AsRef<Path>) -> SimResult<Workload> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| SimError::MalformedInput(format!("{}: {}", path.display(), e)))?;
    parse_upload(&path.to_string_lossy(), &bytes)
}
