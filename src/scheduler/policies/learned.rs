/*!
 * Learned Policy
 * Delegates every decision to an injected score model
 */

use crate::core::errors::SimResult;
use crate::model::{FeatureVector, ModelError, ScoreModel};
use crate::scheduler::traits::{Decision, DecisionProvider, Preemption};
use crate::scheduler::types::Policy;
use std::sync::Arc;
use tracing::trace;

/// Preemptive; argmax of the model's scores, ties go to the first maximum
pub struct LearnedProvider {
    model: Arc<dyn ScoreModel>,
}

impl LearnedProvider {
    #[must_use]
    pub fn new(model: Arc<dyn ScoreModel>) -> Self {
        Self { model }
    }
}

impl std::fmt::Debug for LearnedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearnedProvider")
            .field("model", &self.model.describe())
            .finish()
    }
}

impl DecisionProvider for LearnedProvider {
    fn policy(&self) -> Policy {
        Policy::Learned
    }

    fn preemption(&self) -> Preemption {
        Preemption::EveryTick
    }

    fn select(&mut self, decision: &Decision<'_>) -> SimResult<Option<usize>> {
        let candidates = decision.candidates;
        if candidates.is_empty() {
            return Ok(None);
        }

        let features: Vec<FeatureVector> = candidates
            .iter()
            .map(|record| FeatureVector::from_record(record, decision.tick, candidates.len()))
            .collect();

        let scores = self.model.score(&features, decision.tick)?;
        if scores.len() != candidates.len() {
            return Err(ModelError::ScoreCount {
                expected: candidates.len(),
                actual: scores.len(),
            }
            .into());
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, &score) in scores.iter().enumerate() {
            if !score.is_finite() {
                return Err(ModelError::NonFinite { index, score }.into());
            }
            // Strict comparison keeps the first maximum
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        trace!(tick = decision.tick, ?scores, "Learned policy scored candidates");
        Ok(best.map(|(index, _)| index))
    }
}
