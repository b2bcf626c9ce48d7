/*!
 * Decision Provider Traits
 * Interface between the tick loop and a scheduling policy
 */

use super::types::Policy;
use crate::core::errors::SimResult;
use crate::core::types::{Pid, Tick};
use crate::process::ProcessRecord;

/// When the engine consults the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preemption {
    /// Re-evaluate every tick; the running process competes with the ready queue
    EveryTick,
    /// Select only when the CPU is idle or the running quantum has expired
    QuantumExpiry,
}

/// One scheduling decision point
#[derive(Debug, Clone, Copy)]
pub struct Decision<'a> {
    pub tick: Tick,
    /// Ready queue in queue order, followed by the running process for
    /// preemptive policies
    pub candidates: &'a [&'a ProcessRecord],
    pub running: Option<Pid>,
}

/// Scheduling policy consulted by the engine
///
/// One provider instance serves exactly one simulation run, so providers may
/// keep per-run state (e.g. a round-robin cursor).
pub trait DecisionProvider: Send {
    /// Policy implemented by this provider
    fn policy(&self) -> Policy;

    /// Preemption rule applied by the engine
    fn preemption(&self) -> Preemption;

    /// Pick a candidate, returning its position in `decision.candidates`
    fn select(&mut self, decision: &Decision<'_>) -> SimResult<Option<usize>>;

    /// Where a quantum-expired process re-enters the ready queue
    ///
    /// `dispatched_from` is the queue position the process was taken from.
    /// Defaults to the back of the queue.
    fn requeue_position(&mut self, dispatched_from: usize, ready_len: usize) -> usize {
        let _ = dispatched_from;
        ready_len
    }
}

/// Position of the candidate with the smallest key, ties broken by lowest pid
pub(crate) fn min_by_key_then_pid<K, F>(candidates: &[&ProcessRecord], key: F) -> Option<usize>
where
    K: Ord,
    F: Fn(&ProcessRecord) -> K,
{
    candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, record)| (key(record), record.pid()))
        .map(|(index, _)| index)
}
