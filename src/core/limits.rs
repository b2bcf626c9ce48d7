/*!
 * Simulation Limits and Defaults
 *
 * Centralized location for simulator-wide limits and default parameters.
 * Grouped by the subsystem that consumes them.
 */

use super::types::{Priority, Tick};

// =============================================================================
// ENGINE LIMITS
// =============================================================================

/// Hard upper bound on simulated ticks per run
/// A run that has not finished by this tick is truncated and flagged as such
pub const DEFAULT_MAX_TICKS: Tick = 10_000;

/// Default time quantum for quantum-bounded policies (SJF, round-robin)
pub const DEFAULT_TIME_QUANTUM: Tick = 1;

// =============================================================================
// WORKLOAD GENERATION
// =============================================================================

/// Default number of generated processes
pub const DEFAULT_GENERATED_COUNT: usize = 10;

/// Largest gap between consecutive generated arrivals (inclusive)
pub const DEFAULT_MAX_ARRIVAL_GAP: Tick = 3;

/// Mean burst length of generated processes
pub const DEFAULT_MEAN_BURST: f64 = 6.0;

/// Highest priority value handed out by the generator (inclusive)
pub const DEFAULT_MAX_PRIORITY: Priority = 7;

// =============================================================================
// MODEL
// =============================================================================

/// Number of features fed to a score model per candidate
pub const FEATURE_COUNT: usize = 6;

/// Model file looked up when no path is configured
pub const DEFAULT_MODEL_PATH: &str = "models/scheduler.json";
