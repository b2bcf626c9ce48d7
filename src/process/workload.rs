/*!
 * Workload
 * Ordered, pid-unique collection of processes
 */

use super::types::Process;
use super::validation::{validate_processes, validate_row};
use crate::core::errors::SimResult;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Raw process description as received from a parser or a request body
///
/// Every field is optional so that a missing value is reported as an invalid
/// workload instead of a parse failure.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadRow {
    pub pid: Option<i64>,
    pub arrival: Option<i64>,
    pub burst: Option<i64>,
    pub priority: Option<i64>,
    pub deadline: Option<i64>,
}

impl From<&Process> for WorkloadRow {
    fn from(process: &Process) -> Self {
        Self {
            pid: Some(i64::from(process.pid)),
            arrival: Some(process.arrival as i64),
            burst: Some(process.burst as i64),
            priority: Some(i64::from(process.priority)),
            deadline: process.deadline.map(|d| d as i64),
        }
    }
}

/// Validated workload
///
/// Order is significant: it decides admission order within a tick and seeds
/// round-robin ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    /// Build a workload, rejecting duplicate pids and empty bursts
    pub fn new(processes: Vec<Process>) -> SimResult<Self> {
        validate_processes(&processes)?;
        Ok(Self { processes })
    }

    /// Validate raw rows into a workload
    pub fn from_rows(rows: &[WorkloadRow]) -> SimResult<Self> {
        let processes = rows
            .iter()
            .enumerate()
            .map(|(index, row)| validate_row(index, row))
            .collect::<SimResult<Vec<_>>>()?;
        Self::new(processes)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    /// Convert back to raw rows (e.g. to hand a generated workload to a client)
    #[must_use]
    pub fn to_rows(&self) -> Vec<WorkloadRow> {
        self.processes.iter().map(WorkloadRow::from).collect()
    }
}

impl<'a> IntoIterator for &'a Workload {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

impl TryFrom<Vec<Process>> for Workload {
    type Error = crate::core::errors::SimError;

    fn try_from(processes: Vec<Process>) -> SimResult<Self> {
        Self::new(processes)
    }
}

impl<'de> Deserialize<'de> for Workload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<WorkloadRow>::deserialize(deserializer)?;
        Self::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}
