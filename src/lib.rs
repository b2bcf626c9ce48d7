/*!
 * schedsim Library
 * Discrete-time CPU scheduling simulator exposed as a library
 */

pub mod api;
pub mod core;
pub mod model;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod sources;

// Re-exports
pub use api::{ModelInfo, PolicyComparison, SimulateRequest, SimulateResponse, Simulator};
pub use crate::core::{Pid, Priority, SimConfig, SimError, SimResult, Tick};
pub use model::{FeatureVector, LinearModel, ModelError, ModelHandle, ScoreModel};
pub use monitoring::{init_tracing, Metrics, MetricsCalculator, ProcessMetrics};
pub use process::{Process, ProcessRecord, ProcessSummary, Workload, WorkloadRow};
pub use scheduler::{
    provider_for, simulate, Decision, DecisionProvider, EngineOptions, Occupant, Policy,
    Preemption, RunStats, SchedulerEngine, SimulationOutcome, TimeQuantum, Timeline,
    TimelineEntry,
};
pub use sources::{
    generate_workload, load_workload, parse_csv, parse_json, parse_upload, BurstDistribution,
    GeneratorConfig,
};
