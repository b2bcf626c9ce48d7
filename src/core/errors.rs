/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export ModelError from model module
pub use crate::model::ModelError;

/// Simulation result
///
/// # Must Use
/// Every validation failure surfaces here before any simulation state exists
pub type SimResult<T> = Result<T, SimError>;

/// Simulation errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Invalid workload: {0}")]
    #[diagnostic(
        code(sim::invalid_workload),
        help("Every process needs a unique non-negative pid, a non-negative arrival and a positive burst.")
    )]
    InvalidWorkload(String),

    #[error("Unknown scheduling policy '{0}'")]
    #[diagnostic(
        code(sim::unknown_policy),
        help("Use one of: srtf, sjf, priority, rr, learned.")
    )]
    UnknownPolicy(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(sim::invalid_config),
        help("Time quantum and safety bound must be positive; generator parameters must be finite.")
    )]
    InvalidConfig(String),

    #[error("Learned policy requested but no score model is configured")]
    #[diagnostic(
        code(sim::model_unavailable),
        help("Install a model or point SCHEDSIM_MODEL_PATH at a model file first.")
    )]
    ModelUnavailable,

    #[error("Score model failed: {0}")]
    #[diagnostic(
        code(sim::model_failure),
        help("The model must return one finite score per candidate.")
    )]
    ModelFailure(String),

    #[error("Malformed input: {0}")]
    #[diagnostic(
        code(sim::malformed_input),
        help("CSV needs a header 'pid,arrival,burst[,priority][,deadline]'; JSON must be an array of objects.")
    )]
    MalformedInput(String),
}

impl SimError {
    /// Whether the error was caused by caller input rather than the model
    #[inline]
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        !matches!(self, Self::ModelUnavailable | Self::ModelFailure(_))
    }
}

// Allow conversion from ModelError to SimError
impl From<ModelError> for SimError {
    fn from(err: ModelError) -> Self {
        SimError::ModelFailure(err.to_string())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::MalformedInput(format!("JSON: {}", err))
    }
}

impl From<csv::Error> for SimError {
    fn from(err: csv::Error) -> Self {
        SimError::MalformedInput(format!("CSV: {}", err))
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::MalformedInput(format!("I/O: {}", err))
    }
}
