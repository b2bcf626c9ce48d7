/*!
 * Scheduler Engine
 * Discrete-time tick loop shared by every policy
 *
 * Each tick: admit arrivals, let the active decision provider choose,
 * apply context-switch bookkeeping, execute one unit of work, record the
 * occupant. Preemptive and quantum-bounded policies differ only in when the
 * provider is consulted.
 */

use super::policies::provider_for;
use super::timeline::{Occupant, Timeline};
use super::traits::{Decision, DecisionProvider, Preemption};
use super::types::{Policy, TimeQuantum};
use crate::core::errors::{SimError, SimResult};
use crate::core::limits::DEFAULT_MAX_TICKS;
use crate::core::types::{Pid, Tick};
use crate::model::ScoreModel;
use crate::monitoring::metrics::{Metrics, MetricsCalculator, ProcessMetrics};
use crate::process::{ProcessRecord, ProcessSummary, Workload};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// Per-run engine parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub time_quantum: TimeQuantum,
    /// Safety bound; runs still unfinished at this tick are truncated
    pub max_ticks: Tick,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            time_quantum: TimeQuantum::default(),
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl EngineOptions {
    #[inline]
    #[must_use]
    pub fn with_quantum(mut self, quantum: TimeQuantum) -> Self {
        self.time_quantum = quantum;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: Tick) -> Self {
        self.max_ticks = max_ticks;
        self
    }
}

/// Counters gathered while the tick loop runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub ticks: u64,
    pub busy_ticks: u64,
    pub idle_ticks: u64,
    /// Dispatches that changed the process on the CPU
    pub context_switches: u64,
    /// Unfinished processes displaced by a different process
    pub preemptions: u64,
    /// Whether the safety bound cut the run short
    pub truncated: bool,
}

impl RunStats {
    /// Fraction of ticks spent executing work
    #[must_use]
    pub fn cpu_utilization(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.busy_ticks as f64 / self.ticks as f64
        }
    }
}

/// Everything a finished (or truncated) run produced
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub run_id: Uuid,
    pub policy: Policy,
    pub time_quantum: TimeQuantum,
    pub timeline: Timeline,
    /// Final process states, in workload order
    pub processes: Vec<ProcessRecord>,
    pub stats: RunStats,
}

impl SimulationOutcome {
    /// Aggregate metrics of the run
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        MetricsCalculator::compute(&self.processes, &self.timeline)
    }

    /// Per-process metrics of the run
    #[must_use]
    pub fn process_metrics(&self) -> Vec<ProcessMetrics> {
        MetricsCalculator::per_process(&self.processes, &self.timeline)
    }

    /// Final state of `pid`
    #[must_use]
    pub fn record(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|record| record.pid() == pid)
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<ProcessSummary> {
        self.processes.iter().map(ProcessSummary::from).collect()
    }
}

/// Single-CPU scheduling engine
///
/// Consumed by [`SchedulerEngine::run`]: a provider carries per-run state.
pub struct SchedulerEngine {
    provider: Box<dyn DecisionProvider>,
    options: EngineOptions,
}

impl SchedulerEngine {
    /// Create engine around an explicit provider
    pub fn new(provider: Box<dyn DecisionProvider>, options: EngineOptions) -> SimResult<Self> {
        if options.max_ticks == 0 {
            return Err(SimError::InvalidConfig(
                "safety bound must be at least one tick".to_string(),
            ));
        }
        Ok(Self { provider, options })
    }

    /// Create engine for a named policy
    pub fn for_policy(
        policy: Policy,
        model: Option<Arc<dyn ScoreModel>>,
        options: EngineOptions,
    ) -> SimResult<Self> {
        Self::new(provider_for(policy, model)?, options)
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> Policy {
        self.provider.policy()
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Simulate `workload` to completion or to the safety bound
    pub fn run(mut self, workload: &Workload) -> SimResult<SimulationOutcome> {
        let run_id = Uuid::new_v4();
        let policy = self.provider.policy();
        let quantum = self.options.time_quantum.ticks();
        let span = info_span!(
            "simulation",
            %run_id,
            policy = %policy,
            quantum,
            processes = workload.len()
        );
        let _entered = span.enter();

        let mut state = RunState::new(workload, self.options.max_ticks);
        let preemption = self.provider.preemption();
        let mut tick: Tick = 0;

        while state.unfinished > 0 && tick < self.options.max_ticks {
            state.admit(tick);
            match preemption {
                Preemption::EveryTick => {
                    state.select_preemptive(self.provider.as_mut(), tick, quantum)?
                }
                Preemption::QuantumExpiry => {
                    state.select_on_expiry(self.provider.as_mut(), tick, quantum)?
                }
            }
            state.execute(tick);
            tick += 1;
        }

        state.stats.ticks = tick;
        if state.unfinished > 0 {
            state.stats.truncated = true;
            warn!(
                unfinished = state.unfinished,
                max_ticks = self.options.max_ticks,
                "Safety bound reached; returning truncated timeline"
            );
        }

        info!(
            ticks = state.stats.ticks,
            context_switches = state.stats.context_switches,
            preemptions = state.stats.preemptions,
            truncated = state.stats.truncated,
            "Simulation finished"
        );

        Ok(SimulationOutcome {
            run_id,
            policy,
            time_quantum: self.options.time_quantum,
            timeline: state.timeline,
            processes: state.records,
            stats: state.stats,
        })
    }
}

/// Run `workload` under `policy`
///
/// Pure function of its arguments: the workload is copied into an engine-owned
/// arena and never mutated.
pub fn simulate(
    workload: &Workload,
    policy: Policy,
    options: EngineOptions,
    model: Option<Arc<dyn ScoreModel>>,
) -> SimResult<SimulationOutcome> {
    SchedulerEngine::for_policy(policy, model, options)?.run(workload)
}

/// Process currently holding the CPU
#[derive(Debug, Clone, Copy)]
struct Dispatch {
    slot: usize,
    /// Ready-queue position it was taken from
    from: usize,
    scheduled_end: Tick,
}

/// Mutable state of one run; slots index into `records`
struct RunState {
    records: Vec<ProcessRecord>,
    /// Slots sorted by arrival, workload order within a tick
    arrivals: Vec<usize>,
    next_arrival: usize,
    ready: VecDeque<usize>,
    running: Option<Dispatch>,
    last_slot: Option<usize>,
    unfinished: usize,
    timeline: Timeline,
    stats: RunStats,
}

impl RunState {
    fn new(workload: &Workload, max_ticks: Tick) -> Self {
        let records: Vec<ProcessRecord> = workload.iter().copied().map(ProcessRecord::new).collect();

        // Stable sort keeps workload order among equal arrivals
        let mut arrivals: Vec<usize> = (0..records.len()).collect();
        arrivals.sort_by_key(|&slot| records[slot].arrival());

        // Never more entries than the safety bound allows
        let capacity = records
            .iter()
            .map(ProcessRecord::burst)
            .fold(0, Tick::saturating_add)
            .min(max_ticks);
        let capacity = usize::try_from(capacity).unwrap_or(usize::MAX);

        Self {
            unfinished: records.len(),
            records,
            arrivals,
            next_arrival: 0,
            ready: VecDeque::new(),
            running: None,
            last_slot: None,
            timeline: Timeline::with_capacity(capacity),
            stats: RunStats::default(),
        }
    }

    fn admit(&mut self, tick: Tick) {
        while let Some(&slot) = self.arrivals.get(self.next_arrival) {
            if self.records[slot].arrival() > tick {
                break;
            }
            self.ready.push_back(slot);
            self.next_arrival += 1;
        }
    }

    /// Ask the provider; returns the chosen slot
    fn choose(
        &self,
        provider: &mut dyn DecisionProvider,
        tick: Tick,
        include_running: bool,
    ) -> SimResult<Option<usize>> {
        let mut slots: Vec<usize> = self.ready.iter().copied().collect();
        if include_running {
            if let Some(run) = self.running {
                slots.push(run.slot);
            }
        }

        let candidates: Vec<&ProcessRecord> = slots.iter().map(|&s| &self.records[s]).collect();
        let decision = Decision {
            tick,
            candidates: &candidates,
            running: self.running.map(|run| self.records[run.slot].pid()),
        };

        match provider.select(&decision)? {
            None => Ok(None),
            Some(index) => slots.get(index).copied().map(Some).ok_or_else(|| {
                SimError::ModelFailure(format!(
                    "policy '{}' selected candidate {} of {}",
                    provider.policy(),
                    index,
                    slots.len()
                ))
            }),
        }
    }

    fn select_preemptive(
        &mut self,
        provider: &mut dyn DecisionProvider,
        tick: Tick,
        quantum: Tick,
    ) -> SimResult<()> {
        if self.ready.is_empty() {
            return Ok(());
        }

        let Some(slot) = self.choose(provider, tick, true)? else {
            return Ok(());
        };

        if self.running.map(|run| run.slot) == Some(slot) {
            return Ok(());
        }

        // A running process always has work left: completion clears it
        if let Some(previous) = self.running.take() {
            self.ready.push_back(previous.slot);
            self.stats.preemptions += 1;
            debug!(
                tick,
                preempted = self.records[previous.slot].pid(),
                by = self.records[slot].pid(),
                "Preempted"
            );
        }

        self.dispatch(slot, tick, quantum);
        Ok(())
    }

    fn select_on_expiry(
        &mut self,
        provider: &mut dyn DecisionProvider,
        tick: Tick,
        quantum: Tick,
    ) -> SimResult<()> {
        let mut expired = None;
        if let Some(run) = self.running {
            if tick >= run.scheduled_end {
                let position = provider
                    .requeue_position(run.from, self.ready.len())
                    .min(self.ready.len());
                self.ready.insert(position, run.slot);
                self.running = None;
                expired = Some(run.slot);
            }
        }

        if self.running.is_some() || self.ready.is_empty() {
            return Ok(());
        }

        if let Some(slot) = self.choose(provider, tick, false)? {
            if expired.is_some_and(|previous| previous != slot) {
                self.stats.preemptions += 1;
            }
            self.dispatch(slot, tick, quantum);
        }
        Ok(())
    }

    fn dispatch(&mut self, slot: usize, tick: Tick, quantum: Tick) {
        let position = self.ready.iter().position(|&s| s == slot);
        if let Some(position) = position {
            self.ready.remove(position);
        }

        let record = &mut self.records[slot];
        if record.mark_dispatched(tick) {
            debug!(tick, pid = record.pid(), "First response");
        }

        if self.last_slot != Some(slot) {
            self.stats.context_switches += 1;
        }
        self.last_slot = Some(slot);

        self.running = Some(Dispatch {
            slot,
            from: position.unwrap_or(self.ready.len()),
            scheduled_end: tick.saturating_add(quantum),
        });
    }

    fn execute(&mut self, tick: Tick) {
        let Some(run) = self.running else {
            self.timeline.push(tick, Occupant::Idle);
            self.stats.idle_ticks += 1;
            return;
        };

        let record = &mut self.records[run.slot];
        let pid = record.pid();
        let finished = record.run_tick(tick);
        self.timeline.push(tick, Occupant::Process(pid));
        self.stats.busy_ticks += 1;

        if finished {
            self.running = None;
            self.unfinished -= 1;
            debug!(tick, pid, completion = tick + 1, "Process completed");
        }
    }
}
