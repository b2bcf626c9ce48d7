/*!
 * Simulator
 * Transport-free service facade over the engine, sources and model
 *
 * Cheap to clone; clones share the model handle so a reload is seen by
 * every clone on its next run.
 */

use super::types::{ModelInfo, PolicyComparison, SimulateRequest, SimulateResponse};
use crate::core::config::SimConfig;
use crate::core::errors::{SimError, SimResult};
use crate::model::{ModelHandle, ScoreModel};
use crate::process::Workload;
use crate::scheduler::{simulate, EngineOptions, Policy, SimulationOutcome, TimeQuantum};
use crate::sources::{generate_workload, parse_upload, GeneratorConfig};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimConfig,
    model: ModelHandle,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            model: ModelHandle::new(),
        }
    }
}

impl Simulator {
    /// Simulator with default configuration and no model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration, loading the model when its file exists
    ///
    /// A model that fails to load leaves the simulator usable; only the
    /// learned policy becomes unavailable.
    pub fn from_config(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let model = ModelHandle::new();

        match config.model_path.as_deref() {
            Some(path) if path.exists() => {
                if let Err(e) = model.load(path) {
                    warn!(path = %path.display(), error = %e, "Failed to load score model");
                }
            }
            Some(path) => {
                info!(path = %path.display(), "No score model found, learned policy disabled");
            }
            None => {}
        }

        Ok(Self { config, model })
    }

    /// Install an in-memory model
    #[must_use]
    pub fn with_model(self, model: Arc<dyn ScoreModel>) -> Self {
        self.model.install(model);
        self
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Shared handle, for reloading or clearing the model
    #[inline]
    #[must_use]
    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Validate and run a request
    pub fn simulate(&self, request: &SimulateRequest) -> SimResult<SimulateResponse> {
        let policy: Policy = request.policy.parse()?;
        let quantum = match request.time_quantum {
            Some(ticks) => TimeQuantum::new(ticks)?,
            None => self.config.default_quantum,
        };
        let workload = Workload::from_rows(&request.workload)?;

        self.run(&workload, policy, quantum).map(SimulateResponse::from)
    }

    /// Run an already validated workload
    pub fn run(
        &self,
        workload: &Workload,
        policy: Policy,
        quantum: TimeQuantum,
    ) -> SimResult<SimulationOutcome> {
        // One snapshot per run; a concurrent reload only affects later runs
        let model = if policy.requires_model() {
            Some(self.model.current().ok_or(SimError::ModelUnavailable)?)
        } else {
            None
        };

        let options = EngineOptions::default()
            .with_quantum(quantum)
            .with_max_ticks(self.config.max_ticks);
        simulate(workload, policy, options, model)
    }

    /// Generate a synthetic workload
    pub fn generate(&self, config: &GeneratorConfig) -> SimResult<Workload> {
        generate_workload(config)
    }

    /// Parse an uploaded workload document
    pub fn upload(&self, filename: &str, bytes: &[u8]) -> SimResult<Workload> {
        let workload = parse_upload(filename, bytes)?;
        debug!(filename, processes = workload.len(), "Accepted upload");
        Ok(workload)
    }

    #[must_use]
    pub fn model_info(&self) -> ModelInfo {
        let current = self.model.current();
        let source = self.model.source().or_else(|| self.config.model_path.clone());
        ModelInfo {
            model_loaded: current.is_some(),
            model_path: source.map(|p| p.display().to_string()),
            description: current.map(|m| m.describe()),
        }
    }

    /// Run every available policy over the same workload
    ///
    /// The learned policy is skipped when no model is installed.
    pub fn compare(
        &self,
        workload: &Workload,
        quantum: TimeQuantum,
    ) -> SimResult<Vec<PolicyComparison>> {
        let loaded = self.model.is_loaded();
        Policy::ALL
            .iter()
            .filter(|policy| loaded || !policy.requires_model())
            .map(|&policy| {
                let outcome = self.run(workload, policy, quantum)?;
                Ok(PolicyComparison {
                    policy,
                    metrics: outcome.metrics(),
                    stats: outcome.stats,
                })
            })
            .collect()
    }
}
