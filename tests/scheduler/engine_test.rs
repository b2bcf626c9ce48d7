/*!
 * Engine Tests
 * Tick loop behavior shared by every policy
 */

use pretty_assertions::assert_eq;
use schedsim::{
    simulate, EngineOptions, Occupant, Pid, Policy, Process, SimError, Tick, TimeQuantum,
    Timeline, Workload,
};

fn workload(processes: &[(Pid, Tick, Tick)]) -> Workload {
    Workload::new(
        processes
            .iter()
            .map(|&(pid, arrival, burst)| Process::new(pid, arrival, burst))
            .collect(),
    )
    .unwrap()
}

fn pids(timeline: &Timeline) -> Vec<Option<Pid>> {
    timeline.occupants().map(|o| o.pid()).collect()
}

#[test]
fn test_single_process_every_policy() {
    let w = workload(&[(0, 0, 5)]);
    let model: std::sync::Arc<dyn schedsim::ScoreModel> =
        std::sync::Arc::new(schedsim::LinearModel::shortest_remaining());

    for policy in Policy::ALL {
        let outcome = simulate(&w, policy, EngineOptions::default(), Some(model.clone())).unwrap();

        assert_eq!(pids(&outcome.timeline), vec![Some(0); 5], "policy {}", policy);
        let record = outcome.record(0).unwrap();
        assert_eq!(record.first_response, Some(0));
        assert_eq!(record.completion, Some(5));
        assert_eq!(record.remaining, 0);

        let metrics = outcome.metrics();
        assert_eq!(metrics.avg_wait, 0.0);
        assert_eq!(metrics.avg_resp, 0.0);
        assert_eq!(metrics.avg_tat, 5.0);
        assert_eq!(outcome.stats.context_switches, 1);
        assert_eq!(outcome.stats.preemptions, 0);
    }
}

#[test]
fn test_empty_workload() {
    let outcome = simulate(
        &Workload::default(),
        Policy::RoundRobin,
        EngineOptions::default(),
        None,
    )
    .unwrap();

    assert!(outcome.timeline.is_empty());
    assert_eq!(outcome.metrics(), schedsim::Metrics::default());
    assert_eq!(outcome.stats.ticks, 0);
    assert!(!outcome.stats.truncated);
}

#[test]
fn test_srtf_tie_keeps_running_process() {
    let outcome = simulate(
        &workload(&[(0, 0, 3), (1, 1, 2)]),
        Policy::Srtf,
        EngineOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(
        pids(&outcome.timeline),
        vec![Some(0), Some(0), Some(0), Some(1), Some(1)]
    );
    assert_eq!(outcome.record(0).unwrap().completion, Some(3));
    assert_eq!(outcome.record(1).unwrap().completion, Some(5));

    let metrics = outcome.metrics();
    assert_eq!(metrics.avg_wait, 1.0);
    assert_eq!(metrics.avg_tat, 3.5);
    assert_eq!(metrics.avg_resp, 1.0);
    assert_eq!(metrics.miss_rate, 0.0);
}

#[test]
fn test_round_robin_cycles_in_workload_order() {
    let outcome = simulate(
        &workload(&[(0, 0, 2), (1, 0, 2), (2, 0, 2)]),
        Policy::RoundRobin,
        EngineOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(
        pids(&outcome.timeline),
        vec![Some(0), Some(1), Some(2), Some(0), Some(1), Some(2)]
    );
    assert_eq!(outcome.record(0).unwrap().completion, Some(4));
    assert_eq!(outcome.record(1).unwrap().completion, Some(5));
    assert_eq!(outcome.record(2).unwrap().completion, Some(6));
}

#[test]
fn test_round_robin_quantum_two() {
    let options = EngineOptions::default().with_quantum(TimeQuantum::new(2).unwrap());
    let outcome = simulate(
        &workload(&[(0, 0, 3), (1, 0, 3)]),
        Policy::RoundRobin,
        options,
        None,
    )
    .unwrap();

    assert_eq!(
        pids(&outcome.timeline),
        vec![Some(0), Some(0), Some(1), Some(1), Some(0), Some(1)]
    );
}

#[test]
fn test_priority_preempts_on_arrival() {
    let w = Workload::new(vec![
        Process::new(0, 0, 3).with_priority(5),
        Process::new(1, 1, 1).with_priority(1),
    ])
    .unwrap();
    let outcome = simulate(&w, Policy::Priority, EngineOptions::default(), None).unwrap();

    assert_eq!(
        pids(&outcome.timeline),
        vec![Some(0), Some(1), Some(0), Some(0)]
    );
    assert_eq!(outcome.stats.preemptions, 1);
}

#[test]
fn test_sjf_runs_shortest_after_idle_gap() {
    let outcome = simulate(
        &workload(&[(0, 2, 4), (1, 2, 1)]),
        Policy::Sjf,
        EngineOptions::default().with_quantum(TimeQuantum::new(10).unwrap()),
        None,
    )
    .unwrap();

    assert_eq!(
        pids(&outcome.timeline),
        vec![None, None, Some(1), Some(0), Some(0), Some(0), Some(0)]
    );
    assert_eq!(outcome.stats.idle_ticks, 2);
}

#[test]
fn test_truncation_is_not_an_error() {
    let outcome = simulate(
        &workload(&[(0, 0, 10), (1, 0, 10)]),
        Policy::Srtf,
        EngineOptions::default().with_max_ticks(4),
        None,
    )
    .unwrap();

    assert!(outcome.stats.truncated);
    assert_eq!(outcome.timeline.len(), 4);
    assert_eq!(outcome.record(0).unwrap().remaining, 6);
    assert_eq!(outcome.record(1).unwrap().completion, None);

    // Unfinished processes are measured against the end of the timeline
    let per_process = outcome.process_metrics();
    assert_eq!(per_process[1].turnaround, 4);
}

#[test]
fn test_deadline_misses() {
    let w = Workload::new(vec![
        Process::new(0, 0, 2).with_deadline(2),
        Process::new(1, 0, 2).with_deadline(3),
        Process::new(2, 0, 1),
    ])
    .unwrap();
    let outcome = simulate(&w, Policy::Srtf, EngineOptions::default(), None).unwrap();

    // p2 runs first, p0 finishes at 3, p1 at 5
    assert_eq!(
        pids(&outcome.timeline),
        vec![Some(2), Some(0), Some(0), Some(1), Some(1)]
    );
    assert_eq!(outcome.metrics().miss_rate, 1.0);
}

#[test]
fn test_learned_without_model_fails_before_running() {
    let err = simulate(
        &workload(&[(0, 0, 1)]),
        Policy::Learned,
        EngineOptions::default(),
        None,
    )
    .unwrap_err();
    assert_eq!(err, SimError::ModelUnavailable);
}

#[test]
fn test_timeline_wire_format() {
    let outcome = simulate(
        &workload(&[(4, 1, 1)]),
        Policy::Srtf,
        EngineOptions::default(),
        None,
    )
    .unwrap();

    let json = serde_json::to_string(&outcome.timeline).unwrap();
    assert_eq!(json, r#"[{"tick":0,"pid":"idle"},{"tick":1,"pid":4}]"#);
    assert_eq!(outcome.timeline.entries()[0].occupant, Occupant::Idle);
}
