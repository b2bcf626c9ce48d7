/*!
 * Policy Tests
 * Decision providers in isolation, including a mocked score model
 */

use mockall::mock;
use pretty_assertions::assert_eq;
use schedsim::model::{FeatureVector, ModelError, ScoreModel};
use schedsim::scheduler::{
    LearnedProvider, PriorityProvider, RoundRobinProvider, SjfProvider, SrtfProvider,
};
use schedsim::{Decision, DecisionProvider, Preemption, Process, ProcessRecord, SimError, Tick};
use std::sync::Arc;

mock! {
    pub Model {}

    impl ScoreModel for Model {
        fn score(&self, features: &[FeatureVector], tick: Tick) -> Result<Vec<f64>, ModelError>;
        fn describe(&self) -> String;
    }
}

fn records(processes: &[Process]) -> Vec<ProcessRecord> {
    processes.iter().copied().map(ProcessRecord::new).collect()
}

fn select(provider: &mut dyn DecisionProvider, records: &[ProcessRecord]) -> Result<Option<usize>, SimError> {
    let candidates: Vec<&ProcessRecord> = records.iter().collect();
    provider.select(&Decision {
        tick: 3,
        candidates: &candidates,
        running: None,
    })
}

#[test]
fn test_preemption_rules() {
    assert_eq!(SrtfProvider.preemption(), Preemption::EveryTick);
    assert_eq!(PriorityProvider.preemption(), Preemption::EveryTick);
    assert_eq!(SjfProvider.preemption(), Preemption::QuantumExpiry);
    assert_eq!(RoundRobinProvider::new().preemption(), Preemption::QuantumExpiry);
}

#[test]
fn test_srtf_breaks_ties_by_lowest_pid() {
    let mut set = records(&[
        Process::new(7, 0, 4),
        Process::new(2, 0, 9),
        Process::new(3, 0, 4),
    ]);
    set[1].remaining = 4;

    // pids 7, 2 and 3 all have 4 ticks left
    assert_eq!(select(&mut SrtfProvider, &set).unwrap(), Some(1));
}

#[test]
fn test_sjf_uses_full_burst() {
    let mut set = records(&[Process::new(0, 0, 5), Process::new(1, 0, 3)]);
    set[0].remaining = 1;
    assert_eq!(select(&mut SjfProvider, &set).unwrap(), Some(1));
}

#[test]
fn test_priority_lower_value_wins() {
    let set = records(&[
        Process::new(0, 0, 1).with_priority(4),
        Process::new(1, 0, 1).with_priority(-2),
        Process::new(2, 0, 1).with_priority(-2),
    ]);
    assert_eq!(select(&mut PriorityProvider, &set).unwrap(), Some(1));
}

#[test]
fn test_empty_candidates() {
    assert_eq!(select(&mut SrtfProvider, &[]).unwrap(), None);
    assert_eq!(select(&mut RoundRobinProvider::new(), &[]).unwrap(), None);
}

#[test]
fn test_learned_takes_first_maximum() {
    let mut model = MockModel::new();
    model
        .expect_score()
        .returning(|_, _| Ok(vec![0.2, 0.9, 0.9]));

    let mut provider = LearnedProvider::new(Arc::new(model));
    let set = records(&[
        Process::new(0, 0, 1),
        Process::new(1, 0, 1),
        Process::new(2, 0, 1),
    ]);
    assert_eq!(select(&mut provider, &set).unwrap(), Some(1));
}

#[test]
fn test_learned_receives_features() {
    let mut model = MockModel::new();
    model
        .expect_score()
        .withf(|features, tick| {
            *tick == 3
                && features.len() == 2
                && features[0].burst == 6.0
                && features[0].wait == 2.0
                && features[1].priority == 5.0
                && features.iter().all(|f| f.num_ready == 2.0)
        })
        .times(1)
        .returning(|features, _| Ok(features.iter().map(|f| -f.remaining).collect()));

    let mut provider = LearnedProvider::new(Arc::new(model));
    let set = records(&[
        Process::new(0, 1, 6),
        Process::new(1, 0, 2).with_priority(5),
    ]);
    assert_eq!(select(&mut provider, &set).unwrap(), Some(1));
}

#[test]
fn test_learned_rejects_bad_scores() {
    let set = records(&[Process::new(0, 0, 1), Process::new(1, 0, 1)]);

    let mut short = MockModel::new();
    short.expect_score().returning(|_, _| Ok(vec![1.0]));
    let err = select(&mut LearnedProvider::new(Arc::new(short)), &set).unwrap_err();
    assert!(matches!(err, SimError::ModelFailure(_)));

    let mut nan = MockModel::new();
    nan.expect_score().returning(|_, _| Ok(vec![0.5, f64::NAN]));
    let err = select(&mut LearnedProvider::new(Arc::new(nan)), &set).unwrap_err();
    assert!(matches!(err, SimError::ModelFailure(_)));

    let mut failing = MockModel::new();
    failing
        .expect_score()
        .returning(|_, _| Err(ModelError::Evaluation("tensor shape".to_string())));
    let err = select(&mut LearnedProvider::new(Arc::new(failing)), &set).unwrap_err();
    assert_eq!(
        err,
        SimError::ModelFailure("Model evaluation failed: tensor shape".to_string())
    );
}
