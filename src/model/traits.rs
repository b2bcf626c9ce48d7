/*!
 * Score Model Traits
 * Plug-in interface for the learned scheduling policy
 */

use crate::core::limits::FEATURE_COUNT;
use crate::core::types::Tick;
use crate::process::ProcessRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Failed to read model file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to decode model: {0}")]
    Decode(String),

    #[error("Model returned {actual} scores for {expected} candidates")]
    ScoreCount { expected: usize, actual: usize },

    #[error("Model returned non-finite score {score} for candidate {index}")]
    NonFinite { index: usize, score: f64 },

    #[error("Model evaluation failed: {0}")]
    Evaluation(String),
}

/// Per-candidate features handed to a score model
///
/// Field order matches [`FeatureVector::as_array`] and the column order the
/// model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub arrival: f64,
    pub burst: f64,
    pub priority: f64,
    pub remaining: f64,
    pub wait: f64,
    pub num_ready: f64,
}

impl FeatureVector {
    /// Build the features of `record` at `tick` among `num_ready` candidates
    #[must_use]
    pub fn from_record(record: &ProcessRecord, tick: Tick, num_ready: usize) -> Self {
        Self {
            arrival: record.arrival() as f64,
            burst: record.burst() as f64,
            priority: f64::from(record.priority()),
            remaining: record.remaining as f64,
            wait: record.wait_at(tick) as f64,
            num_ready: num_ready as f64,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.arrival,
            self.burst,
            self.priority,
            self.remaining,
            self.wait,
            self.num_ready,
        ]
    }
}

/// Externally trained scorer consulted by the learned policy
///
/// Shared read-only between concurrent simulation runs.
pub trait ScoreModel: Send + Sync {
    /// Return one score per candidate, in input order (higher is preferred)
    fn score(&self, features: &[FeatureVector], tick: Tick) -> Result<Vec<f64>, ModelError>;

    /// Human-readable model description
    fn describe(&self) -> String {
        "score model".to_string()
    }
}
