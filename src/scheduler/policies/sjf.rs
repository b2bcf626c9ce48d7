/*!
 * Shortest Job First
 */

use crate::core::errors::SimResult;
use crate::scheduler::traits::{min_by_key_then_pid, Decision, DecisionProvider, Preemption};
use crate::scheduler::types::Policy;

/// Selects only when idle or on quantum expiry; minimum total burst wins
#[derive(Debug, Default)]
pub struct SjfProvider;

impl DecisionProvider for SjfProvider {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn preemption(&self) -> Preemption {
        Preemption::QuantumExpiry
    }

    fn select(&mut self, decision: &Decision<'_>) -> SimResult<Option<usize>> {
        Ok(min_by_key_then_pid(decision.candidates, |p| p.burst()))
    }
}
