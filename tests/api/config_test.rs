/*!
 * Configuration Tests
 * Environment-driven configuration; serialized because env vars are global
 */

use schedsim::core::config::{ENV_MAX_TICKS, ENV_MODEL_PATH, ENV_TIME_QUANTUM};
use schedsim::core::limits::DEFAULT_MODEL_PATH;
use schedsim::{SimConfig, SimError};
use serial_test::serial;
use std::path::PathBuf;

fn clear_env() {
    std::env::remove_var(ENV_MAX_TICKS);
    std::env::remove_var(ENV_TIME_QUANTUM);
    std::env::remove_var(ENV_MODEL_PATH);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = SimConfig::from_env().unwrap();
    assert_eq!(config.max_ticks, 10_000);
    assert_eq!(config.default_quantum.ticks(), 1);
    assert_eq!(config.model_path, Some(PathBuf::from(DEFAULT_MODEL_PATH)));
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(ENV_MAX_TICKS, "250");
    std::env::set_var(ENV_TIME_QUANTUM, "4");
    std::env::set_var(ENV_MODEL_PATH, "/tmp/sched-model.json");

    let config = SimConfig::from_env().unwrap();
    assert_eq!(config.max_ticks, 250);
    assert_eq!(config.default_quantum.ticks(), 4);
    assert_eq!(config.model_path, Some(PathBuf::from("/tmp/sched-model.json")));
    clear_env();
}

#[test]
#[serial]
fn test_from_env_rejects_bad_values() {
    clear_env();
    std::env::set_var(ENV_TIME_QUANTUM, "0");
    assert!(matches!(SimConfig::from_env(), Err(SimError::InvalidConfig(_))));

    std::env::set_var(ENV_TIME_QUANTUM, "2");
    std::env::set_var(ENV_MAX_TICKS, "lots");
    assert!(matches!(SimConfig::from_env(), Err(SimError::InvalidConfig(_))));
    clear_env();
}
