/*!
 * Static Priority
 */

use crate::core::errors::SimResult;
use crate::scheduler::traits::{min_by_key_then_pid, Decision, DecisionProvider, Preemption};
use crate::scheduler::types::Policy;

/// Preemptive; lowest priority value wins, ties go to the lowest pid
#[derive(Debug, Default)]
pub struct PriorityProvider;

impl DecisionProvider for PriorityProvider {
    fn policy(&self) -> Policy {
        Policy::Priority
    }

    fn preemption(&self) -> Preemption {
        Preemption::EveryTick
    }

    fn select(&mut self, decision: &Decision<'_>) -> SimResult<Option<usize>> {
        Ok(min_by_key_then_pid(decision.candidates, |p| p.priority()))
    }
}
