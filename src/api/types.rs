/*!
 * API Types
 * Request and response shapes of the service facade
 */

use crate::monitoring::{Metrics, ProcessMetrics};
use crate::process::{ProcessSummary, WorkloadRow};
use crate::scheduler::{Policy, RunStats, SimulationOutcome, Timeline};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

fn default_policy() -> String {
    Policy::Srtf.as_str().to_string()
}

/// Simulate request body
///
/// Policy and quantum arrive unvalidated; the simulator rejects bad values
/// before any run state exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub workload: Vec<WorkloadRow>,
    #[serde(default = "default_policy")]
    pub policy: String,
    #[serde(default)]
    pub time_quantum: Option<i64>,
}

impl SimulateRequest {
    #[must_use]
    pub fn new(workload: Vec<WorkloadRow>, policy: impl Into<String>) -> Self {
        Self {
            workload,
            policy: policy.into(),
            time_quantum: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }
}

/// Simulate response body
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub run_id: String,
    pub policy: Policy,
    pub timeline: Timeline,
    pub metrics: Metrics,
    pub procs: Vec<ProcessSummary>,
    pub stats: RunStats,
    pub process_metrics: Option<Vec<ProcessMetrics>>,
}

impl From<SimulationOutcome> for SimulateResponse {
    fn from(outcome: SimulationOutcome) -> Self {
        let metrics = outcome.metrics();
        let process_metrics = outcome.process_metrics();
        let procs = outcome.summaries();
        Self {
            run_id: outcome.run_id.to_string(),
            policy: outcome.policy,
            timeline: outcome.timeline,
            metrics,
            procs,
            stats: outcome.stats,
            process_metrics: Some(process_metrics),
        }
    }
}

/// Model status
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_loaded: bool,
    pub model_path: Option<String>,
    pub description: Option<String>,
}

/// One row of a side-by-side policy comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyComparison {
    pub policy: Policy,
    pub metrics: Metrics,
    pub stats: RunStats,
}
