/*!
 * Engine Property Tests
 * Invariants that hold for every policy and any valid workload
 */

use proptest::prelude::*;
use schedsim::{
    simulate, EngineOptions, LinearModel, Pid, Policy, Process, ScoreModel, Tick, TimeQuantum,
    Workload,
};
use std::sync::Arc;

/// Model for the learned policy; ignored by the heuristics
fn model() -> Option<Arc<dyn ScoreModel>> {
    Some(Arc::new(LinearModel::shortest_remaining()))
}

fn arb_workload() -> impl Strategy<Value = Workload> {
    prop::collection::vec((0u64..12, 1u64..7, 0i32..8), 0..10).prop_map(|specs| {
        let processes = specs
            .into_iter()
            .enumerate()
            .map(|(index, (arrival, burst, priority))| {
                Process::new(index as Pid, arrival, burst).with_priority(priority)
            })
            .collect();
        Workload::new(processes).unwrap()
    })
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(Policy::Srtf),
        Just(Policy::Sjf),
        Just(Policy::Priority),
        Just(Policy::RoundRobin),
        Just(Policy::Learned),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_runs_complete_and_stay_consistent(
        workload in arb_workload(),
        policy in arb_policy(),
        quantum in 1i64..5,
    ) {
        let options = EngineOptions::default().with_quantum(TimeQuantum::new(quantum).unwrap());
        let outcome = simulate(&workload, policy, options, model()).unwrap();

        prop_assert!(!outcome.stats.truncated);

        // Ticks are contiguous from zero
        for (index, entry) in outcome.timeline.iter().enumerate() {
            prop_assert_eq!(entry.tick, index as Tick);
        }

        let total_burst: Tick = workload.iter().map(|p| p.burst).sum();
        prop_assert_eq!(outcome.stats.busy_ticks, total_burst);
        prop_assert_eq!(
            outcome.stats.busy_ticks + outcome.stats.idle_ticks,
            outcome.timeline.len() as u64
        );

        for record in &outcome.processes {
            let completion = record.completion.unwrap();
            prop_assert_eq!(record.remaining, 0);
            prop_assert!(completion > record.arrival());
            prop_assert!(record.first_response.unwrap() >= record.arrival());
            prop_assert_eq!(outcome.timeline.occupancy(record.pid()) as u64, record.burst());

            // Only occupies the CPU inside [arrival, completion)
            for entry in outcome.timeline.iter() {
                if entry.occupant.pid() == Some(record.pid()) {
                    prop_assert!(entry.tick >= record.arrival() && entry.tick < completion);
                }
            }
        }

        // Work conserving: idle only when nothing has arrived and is unfinished
        for entry in outcome.timeline.iter().filter(|e| e.occupant.is_idle()) {
            let waiting = outcome.processes.iter().any(|r| {
                r.arrival() <= entry.tick && entry.tick < r.completion.unwrap()
            });
            prop_assert!(!waiting, "idle at tick {} with work pending", entry.tick);
        }
    }

    #[test]
    fn prop_metrics_identities(workload in arb_workload(), policy in arb_policy()) {
        let outcome = simulate(&workload, policy, EngineOptions::default(), model()).unwrap();
        let metrics = outcome.metrics();

        if workload.is_empty() {
            prop_assert_eq!(metrics, schedsim::Metrics::default());
        } else {
            let mean_burst = workload.iter().map(|p| p.burst as f64).sum::<f64>()
                / workload.len() as f64;
            prop_assert!((metrics.avg_tat - metrics.avg_wait - mean_burst).abs() < 1e-9);
            prop_assert!(metrics.avg_wait >= 0.0);
            prop_assert!(metrics.avg_resp >= 0.0 && metrics.avg_resp <= metrics.avg_wait + 1e-9);
        }
    }

    #[test]
    fn prop_runs_are_deterministic(workload in arb_workload(), policy in arb_policy()) {
        let first = simulate(&workload, policy, EngineOptions::default(), model()).unwrap();
        let second = simulate(&workload, policy, EngineOptions::default(), model()).unwrap();
        prop_assert_eq!(first.timeline, second.timeline);
        prop_assert_eq!(first.processes, second.processes);
        prop_assert_eq!(first.stats, second.stats);
    }
}
