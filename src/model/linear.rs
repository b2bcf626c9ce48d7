/*!
 * Linear Score Model
 * Logistic regression over the candidate feature vector
 */

use super::traits::{FeatureVector, ModelError, ScoreModel};
use crate::core::types::Tick;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One weight per feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureWeights {
    pub arrival: f64,
    pub burst: f64,
    pub priority: f64,
    pub remaining: f64,
    pub wait: f64,
    pub num_ready: f64,
}

impl FeatureWeights {
    #[inline]
    fn dot(&self, features: &FeatureVector) -> f64 {
        self.arrival * features.arrival
            + self.burst * features.burst
            + self.priority * features.priority
            + self.remaining * features.remaining
            + self.wait * features.wait
            + self.num_ready * features.num_ready
    }
}

/// Probability-of-selection model: `sigmoid(bias + weights · features)`
///
/// File format (JSON):
/// ```json
/// { "weights": { "remaining": -1.0, "wait": 0.05 }, "bias": 0.0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: FeatureWeights,
    #[serde(default)]
    pub bias: f64,
}

impl LinearModel {
    #[must_use]
    pub fn new(weights: FeatureWeights, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Imitates the shortest-remaining-time oracle
    #[must_use]
    pub fn shortest_remaining() -> Self {
        Self::new(
            FeatureWeights {
                remaining: -1.0,
                ..FeatureWeights::default()
            },
            0.0,
        )
    }

    /// Imitates the static-priority oracle
    #[must_use]
    pub fn highest_priority() -> Self {
        Self::new(
            FeatureWeights {
                priority: -1.0,
                ..FeatureWeights::default()
            },
            0.0,
        )
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let model: Self =
            serde_json::from_str(text).map_err(|e| ModelError::Decode(e.to_string()))?;
        model.check()?;
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    fn check(&self) -> Result<(), ModelError> {
        let w = &self.weights;
        let all = [
            w.arrival,
            w.burst,
            w.priority,
            w.remaining,
            w.wait,
            w.num_ready,
            self.bias,
        ];
        if all.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(ModelError::Decode(
                "weights and bias must be finite".to_string(),
            ))
        }
    }
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl ScoreModel for LinearModel {
    fn score(&self, features: &[FeatureVector], _tick: Tick) -> Result<Vec<f64>, ModelError> {
        Ok(features
            .iter()
            .map(|f| sigmoid(self.bias + self.weights.dot(f)))
            .collect())
    }

    fn describe(&self) -> String {
        format!("linear(bias={}, weights={:?})", self.bias, self.weights)
    }
}
