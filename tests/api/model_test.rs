/*!
 * Model Lifecycle Tests
 * Loading, swapping and sharing the learned policy's model
 */

use mockall::mock;
use pretty_assertions::assert_eq;
use schedsim::model::FeatureVector;
use schedsim::{
    LinearModel, ModelError, Pid, Policy, Process, ScoreModel, SimConfig, SimError, Simulator,
    Tick, TimeQuantum, Workload,
};
use std::io::Write;
use std::sync::Arc;
use std::thread;

mock! {
    pub Model {}

    impl ScoreModel for Model {
        fn score(&self, features: &[FeatureVector], tick: Tick) -> Result<Vec<f64>, ModelError>;
        fn describe(&self) -> String;
    }
}

fn workload(processes: &[(Pid, Tick, Tick)]) -> Workload {
    Workload::new(
        processes
            .iter()
            .map(|&(pid, arrival, burst)| Process::new(pid, arrival, burst))
            .collect(),
    )
    .unwrap()
}

fn longest_job_model() -> MockModel {
    let mut model = MockModel::new();
    model.expect_describe().return_const("longest job".to_string());
    model
        .expect_score()
        .returning(|features, _| Ok(features.iter().map(|f| f.burst).collect()));
    model
}

#[test]
fn test_mocked_model_drives_learned_policy() {
    let sim = Simulator::new().with_model(Arc::new(longest_job_model()));
    let outcome = sim
        .run(
            &workload(&[(0, 0, 2), (1, 0, 4)]),
            Policy::Learned,
            TimeQuantum::default(),
        )
        .unwrap();

    let pids: Vec<Option<Pid>> = outcome.timeline.occupants().map(|o| o.pid()).collect();
    assert_eq!(
        pids,
        vec![Some(1), Some(1), Some(1), Some(1), Some(0), Some(0)]
    );
    assert_eq!(sim.model_info().description.as_deref(), Some("longest job"));
}

#[test]
fn test_model_failure_mid_run() {
    let mut model = MockModel::new();
    model.expect_describe().return_const("flaky".to_string());
    model
        .expect_score()
        .returning(|features, tick| {
            if tick < 2 {
                Ok(vec![1.0; features.len()])
            } else {
                Err(ModelError::Evaluation("out of memory".to_string()))
            }
        });

    let sim = Simulator::new().with_model(Arc::new(model));
    let err = sim
        .run(
            &workload(&[(0, 0, 5), (1, 1, 5)]),
            Policy::Learned,
            TimeQuantum::default(),
        )
        .unwrap_err();
    assert!(matches!(err, SimError::ModelFailure(_)));
}

#[test]
fn test_linear_model_matches_srtf_without_ties() {
    let sim = Simulator::new().with_model(Arc::new(LinearModel::shortest_remaining()));
    let w = workload(&[(0, 0, 4), (1, 1, 1), (2, 2, 6)]);

    let learned = sim.run(&w, Policy::Learned, TimeQuantum::default()).unwrap();
    let srtf = sim.run(&w, Policy::Srtf, TimeQuantum::default()).unwrap();
    assert_eq!(learned.timeline, srtf.timeline);
}

#[test]
fn test_from_config_loads_model_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"weights":{{"remaining":-1.0}},"bias":0.5}}"#).unwrap();
    file.flush().unwrap();

    let sim = Simulator::from_config(SimConfig::default().with_model_path(file.path())).unwrap();
    let info = sim.model_info();
    assert!(info.model_loaded);
    assert_eq!(info.model_path, Some(file.path().display().to_string()));
}

#[test]
fn test_from_config_survives_bad_model() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not a model").unwrap();
    file.flush().unwrap();

    let sim = Simulator::from_config(SimConfig::default().with_model_path(file.path())).unwrap();
    assert!(!sim.model_info().model_loaded);

    let missing = tempfile::tempdir().unwrap().path().join("model.json");
    let sim = Simulator::from_config(SimConfig::default().with_model_path(&missing)).unwrap();
    let info = sim.model_info();
    assert!(!info.model_loaded);
    assert_eq!(info.model_path, Some(missing.display().to_string()));
}

#[test]
fn test_concurrent_runs_share_model() {
    let sim = Simulator::new().with_model(Arc::new(LinearModel::shortest_remaining()));
    let w = Arc::new(workload(&[(0, 0, 3), (1, 1, 1), (2, 1, 2)]));
    let expected = sim.run(&w, Policy::Learned, TimeQuantum::default()).unwrap().timeline;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let sim = sim.clone();
            let w = Arc::clone(&w);
            thread::spawn(move || {
                // Half the threads reinstall the same model while others run
                if i % 2 == 0 {
                    sim.model()
                        .install(Arc::new(LinearModel::shortest_remaining()));
                }
                sim.run(&w, Policy::Learned, TimeQuantum::default())
                    .unwrap()
                    .timeline
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_clearing_model_disables_learned() {
    let sim = Simulator::new().with_model(Arc::new(LinearModel::highest_priority()));
    let clone = sim.clone();
    clone.model().clear();

    let err = sim
        .run(&workload(&[(0, 0, 1)]), Policy::Learned, TimeQuantum::default())
        .unwrap_err();
    assert_eq!(err, SimError::ModelUnavailable);
}
