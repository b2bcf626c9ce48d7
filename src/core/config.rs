/*!
 * Simulator Configuration
 * Environment-driven defaults for the engine and the model lifecycle
 */

use super::errors::{SimError, SimResult};
use super::limits::{DEFAULT_MAX_TICKS, DEFAULT_MODEL_PATH, DEFAULT_TIME_QUANTUM};
use super::types::Tick;
use crate::scheduler::TimeQuantum;
use std::path::PathBuf;

/// Safety bound override
pub const ENV_MAX_TICKS: &str = "SCHEDSIM_MAX_TICKS";
/// Default quantum override
pub const ENV_TIME_QUANTUM: &str = "SCHEDSIM_TIME_QUANTUM";
/// Score model location
pub const ENV_MODEL_PATH: &str = "SCHEDSIM_MODEL_PATH";

/// Simulator-wide configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Safety bound applied to every run
    pub max_ticks: Tick,
    /// Quantum used when a request does not carry one
    pub default_quantum: TimeQuantum,
    /// Where the learned policy's model is loaded from
    pub model_path: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            default_quantum: TimeQuantum::default(),
            model_path: None,
        }
    }
}

impl SimConfig {
    /// Read configuration from the environment
    ///
    /// Environment variables:
    /// - SCHEDSIM_MAX_TICKS: safety bound (default: 10000)
    /// - SCHEDSIM_TIME_QUANTUM: default quantum (default: 1)
    /// - SCHEDSIM_MODEL_PATH: model file (default: models/scheduler.json)
    pub fn from_env() -> SimResult<Self> {
        let max_ticks = match std::env::var(ENV_MAX_TICKS) {
            Ok(raw) => parse_positive(ENV_MAX_TICKS, &raw)?,
            Err(_) => DEFAULT_MAX_TICKS,
        };

        let quantum = match std::env::var(ENV_TIME_QUANTUM) {
            Ok(raw) => parse_positive(ENV_TIME_QUANTUM, &raw)?,
            Err(_) => DEFAULT_TIME_QUANTUM,
        };

        let model_path = std::env::var(ENV_MODEL_PATH)
            .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());

        Ok(Self {
            max_ticks,
            default_quantum: TimeQuantum::new(quantum as i64)?,
            model_path: Some(PathBuf::from(model_path)),
        })
    }

    #[inline]
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: Tick) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_default_quantum(mut self, quantum: TimeQuantum) -> Self {
        self.default_quantum = quantum;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> SimResult<()> {
        if self.max_ticks == 0 {
            return Err(SimError::InvalidConfig(
                "safety bound must be at least one tick".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_positive(key: &str, raw: &str) -> SimResult<Tick> {
    match raw.trim().parse::<Tick>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(SimError::InvalidConfig(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
    }
}
