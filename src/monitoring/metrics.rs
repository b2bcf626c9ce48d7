/*!
 * Scheduling Metrics
 * Aggregate and per-process statistics derived from a finished run
 */

use crate::core::types::{Pid, Tick};
use crate::process::ProcessRecord;
use crate::scheduler::timeline::Timeline;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Aggregate snapshot of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub avg_wait: f64,
    pub avg_tat: f64,
    pub avg_resp: f64,
    pub miss_rate: f64,
}

/// Statistics of one process
///
/// Signed: a run truncated by the safety bound substitutes the end of the
/// timeline for missing completions, which can precede arrival plus burst.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub turnaround: i64,
    pub waiting: i64,
    pub response: i64,
    /// `None` when the process declares no deadline
    pub missed_deadline: Option<bool>,
}

/// Stateless metrics computation
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Per-process statistics, in the order given
    #[must_use]
    pub fn per_process(processes: &[ProcessRecord], timeline: &Timeline) -> Vec<ProcessMetrics> {
        let fallback = Self::fallback_completion(timeline);

        processes
            .iter()
            .map(|record| {
                let completion = record.completion.unwrap_or(fallback);
                let arrival = signed(record.arrival());
                let turnaround = signed(completion).saturating_sub(arrival);
                let response = record
                    .first_response
                    .map_or(0, |first| signed(first).saturating_sub(arrival));

                ProcessMetrics {
                    pid: record.pid(),
                    turnaround,
                    waiting: turnaround.saturating_sub(signed(record.burst())),
                    response,
                    missed_deadline: record.process.deadline.map(|deadline| completion > deadline),
                }
            })
            .collect()
    }

    /// Aggregate statistics; every field is zero for an empty process set
    #[must_use]
    pub fn compute(processes: &[ProcessRecord], timeline: &Timeline) -> Metrics {
        Self::aggregate(&Self::per_process(processes, timeline))
    }

    /// Fold per-process statistics into means and the deadline-miss rate
    #[must_use]
    pub fn aggregate(per_process: &[ProcessMetrics]) -> Metrics {
        if per_process.is_empty() {
            return Metrics::default();
        }

        let n = per_process.len() as f64;
        let (mut wait, mut tat, mut resp) = (0f64, 0f64, 0f64);
        let (mut with_deadline, mut missed) = (0usize, 0usize);

        for metrics in per_process {
            wait += metrics.waiting as f64;
            tat += metrics.turnaround as f64;
            resp += metrics.response as f64;
            if let Some(miss) = metrics.missed_deadline {
                with_deadline += 1;
                if miss {
                    missed += 1;
                }
            }
        }

        Metrics {
            avg_wait: wait / n,
            avg_tat: tat / n,
            avg_resp: resp / n,
            miss_rate: if with_deadline == 0 {
                0.0
            } else {
                missed as f64 / with_deadline as f64
            },
        }
    }

    /// Completion substituted for processes the run never finished
    #[inline]
    fn fallback_completion(timeline: &Timeline) -> Tick {
        timeline.last_tick().map_or(0, |tick| tick + 1)
    }
}

#[inline]
fn signed(ticks: Tick) -> i64 {
    i64::try_from(ticks).unwrap_or(i64::MAX)
}
