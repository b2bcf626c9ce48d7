/*!
 * Round-Robin
 * Ready queue treated as a ring walked by a persistent cursor
 */

use crate::core::errors::SimResult;
use crate::scheduler::traits::{Decision, DecisionProvider, Preemption};
use crate::scheduler::types::Policy;

/// Round-robin provider
///
/// A quantum-expired process is put back at the slot it was dispatched from
/// and the cursor steps past it. A completed process simply leaves the ring,
/// so the cursor already points at its successor.
#[derive(Debug, Default)]
pub struct RoundRobinProvider {
    cursor: usize,
}

impl RoundRobinProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl DecisionProvider for RoundRobinProvider {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn preemption(&self) -> Preemption {
        Preemption::QuantumExpiry
    }

    fn select(&mut self, decision: &Decision<'_>) -> SimResult<Option<usize>> {
        if decision.candidates.is_empty() {
            return Ok(None);
        }
        self.cursor %= decision.candidates.len();
        Ok(Some(self.cursor))
    }

    fn requeue_position(&mut self, dispatched_from: usize, ready_len: usize) -> usize {
        let position = dispatched_from.min(ready_len);
        self.cursor = position + 1;
        position
    }
}
