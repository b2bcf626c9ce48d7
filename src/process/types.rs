/*!
 * Process Types
 * Immutable process descriptions and engine-owned runtime records
 */

use crate::core::types::{Pid, Priority, Tick};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Simulated task as described by a workload
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival: Tick,
    pub burst: Tick,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub deadline: Option<Tick>,
}

impl Process {
    #[inline]
    #[must_use]
    pub fn new(pid: Pid, arrival: Tick, burst: Tick) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority: 0,
            deadline: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_deadline(mut self, deadline: Tick) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Runtime state of one process during a single simulation run
///
/// Owned exclusively by the engine; never aliased with caller data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub process: Process,
    pub remaining: Tick,
    pub first_response: Option<Tick>,
    pub completion: Option<Tick>,
}

impl ProcessRecord {
    #[inline]
    #[must_use]
    pub fn new(process: Process) -> Self {
        Self {
            process,
            remaining: process.burst,
            first_response: None,
            completion: None,
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn pid(&self) -> Pid {
        self.process.pid
    }

    #[inline(always)]
    #[must_use]
    pub const fn arrival(&self) -> Tick {
        self.process.arrival
    }

    #[inline(always)]
    #[must_use]
    pub const fn burst(&self) -> Tick {
        self.process.burst
    }

    #[inline(always)]
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.process.priority
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Ticks since arrival at `tick`
    #[inline]
    #[must_use]
    pub const fn wait_at(&self, tick: Tick) -> Tick {
        tick.saturating_sub(self.process.arrival)
    }

    /// Record a dispatch; only the first one counts as the response
    pub(crate) fn mark_dispatched(&mut self, tick: Tick) -> bool {
        if self.first_response.is_none() {
            self.first_response = Some(tick);
            true
        } else {
            false
        }
    }

    /// Execute one tick of work, returning true when the process finished
    pub(crate) fn run_tick(&mut self, tick: Tick) -> bool {
        debug_assert!(self.remaining > 0, "Process {} ran with no work left", self.pid());
        self.remaining -= 1;
        if self.remaining == 0 {
            self.completion = Some(tick + 1);
            true
        } else {
            false
        }
    }
}

impl From<Process> for ProcessRecord {
    fn from(process: Process) -> Self {
        Self::new(process)
    }
}

/// Final per-process state returned to callers
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub pid: Pid,
    pub arrival: Tick,
    pub burst: Tick,
    pub priority: Priority,
    pub deadline: Option<Tick>,
    pub completion: Option<Tick>,
    pub first_response: Option<Tick>,
}

impl From<&ProcessRecord> for ProcessSummary {
    fn from(record: &ProcessRecord) -> Self {
        Self {
            pid: record.pid(),
            arrival: record.arrival(),
            burst: record.burst(),
            priority: record.priority(),
            deadline: record.process.deadline,
            completion: record.completion,
            first_response: record.first_response,
        }
    }
}
