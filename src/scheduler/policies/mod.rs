/*!
 * Scheduling Policies
 * Heuristic and learned decision providers
 */

mod learned;
mod priority;
mod round_robin;
mod sjf;
mod srtf;

pub use learned::LearnedProvider;
pub use priority::PriorityProvider;
pub use round_robin::RoundRobinProvider;
pub use sjf::SjfProvider;
pub use srtf::SrtfProvider;

use super::traits::DecisionProvider;
use super::types::Policy;
use crate::core::errors::{SimError, SimResult};
use crate::model::ScoreModel;
use std::sync::Arc;

/// Build a fresh provider for one run
///
/// Fails with `ModelUnavailable` when the learned policy is requested
/// without a model.
pub fn provider_for(
    policy: Policy,
    model: Option<Arc<dyn ScoreModel>>,
) -> SimResult<Box<dyn DecisionProvider>> {
    Ok(match policy {
        Policy::Srtf => Box::new(SrtfProvider),
        Policy::Sjf => Box::new(SjfProvider),
        Policy::Priority => Box::new(PriorityProvider),
        Policy::RoundRobin => Box::new(RoundRobinProvider::new()),
        Policy::Learned => {
            let model = model.ok_or(SimError::ModelUnavailable)?;
            Box::new(LearnedProvider::new(model))
        }
    })
}
