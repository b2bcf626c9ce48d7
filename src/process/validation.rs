/*!
 * Workload Validation
 * Input checks that run before any simulation state exists
 */

use super::types::Process;
use super::workload::WorkloadRow;
use crate::core::errors::{SimError, SimResult};
use crate::core::types::{Pid, Priority, Tick};
use ahash::AHashSet;

/// Turn one raw row into a process description
pub(super) fn validate_row(index: usize, row: &WorkloadRow) -> SimResult<Process> {
    let pid = required(index, "pid", row.pid)?;
    let arrival = required(index, "arrival", row.arrival)?;
    let burst = required(index, "burst", row.burst)?;

    let pid = Pid::try_from(pid).map_err(|_| {
        SimError::InvalidWorkload(format!(
            "process #{}: pid {} is outside 0..={}",
            index,
            pid,
            Pid::MAX
        ))
    })?;

    let arrival = Tick::try_from(arrival).map_err(|_| {
        SimError::InvalidWorkload(format!(
            "process {}: arrival {} is negative",
            pid, arrival
        ))
    })?;

    if burst <= 0 {
        return Err(SimError::InvalidWorkload(format!(
            "process {}: burst must be positive, got {}",
            pid, burst
        )));
    }

    let priority = Priority::try_from(row.priority.unwrap_or(0)).map_err(|_| {
        SimError::InvalidWorkload(format!("process {}: priority out of range", pid))
    })?;

    let mut process = Process::new(pid, arrival, burst as Tick).with_priority(priority);
    if let Some(deadline) = row.deadline {
        let deadline = Tick::try_from(deadline).map_err(|_| {
            SimError::InvalidWorkload(format!(
                "process {}: deadline {} is negative",
                pid, deadline
            ))
        })?;
        process = process.with_deadline(deadline);
    }

    Ok(process)
}

/// Check invariants across a whole set of processes
pub(super) fn validate_processes(processes: &[Process]) -> SimResult<()> {
    let mut seen = AHashSet::with_capacity(processes.len());

    for process in processes {
        if process.burst == 0 {
            return Err(SimError::InvalidWorkload(format!(
                "process {}: burst must be positive, got 0",
                process.pid
            )));
        }

        if !seen.insert(process.pid) {
            return Err(SimError::InvalidWorkload(format!(
                "duplicate pid {}",
                process.pid
            )));
        }
    }

    Ok(())
}

fn required(index: usize, field: &str, value: Option<i64>) -> SimResult<i64> {
    value.ok_or_else(|| {
        SimError::InvalidWorkload(format!(
            "process #{} is missing required field '{}'",
            index, field
        ))
    })
}
