/*!
 * Shortest Remaining Time First
 */

use crate::core::errors::SimResult;
use crate::scheduler::traits::{min_by_key_then_pid, Decision, DecisionProvider, Preemption};
use crate::scheduler::types::Policy;

/// Preemptive; minimum remaining work wins, ties go to the lowest pid
#[derive(Debug, Default)]
pub struct SrtfProvider;

impl DecisionProvider for SrtfProvider {
    fn policy(&self) -> Policy {
        Policy::Srtf
    }

    fn preemption(&self) -> Preemption {
        Preemption::EveryTick
    }

    fn select(&mut self, decision: &Decision<'_>) -> SimResult<Option<usize>> {
        Ok(min_by_key_then_pid(decision.candidates, |p| p.remaining))
    }
}
