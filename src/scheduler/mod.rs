/*!
 * Scheduler Module
 * Discrete-time scheduling engine and policy providers
 */

pub mod engine;
pub mod policies;
pub mod timeline;
pub mod traits;
pub mod types;

// Re-export public API
pub use engine::{simulate, EngineOptions, RunStats, SchedulerEngine, SimulationOutcome};
pub use policies::{
    provider_for, LearnedProvider, PriorityProvider, RoundRobinProvider, SjfProvider, SrtfProvider,
};
pub use timeline::{Occupant, Timeline, TimelineEntry};
pub use traits::{Decision, DecisionProvider, Preemption};
pub use types::{Policy, TimeQuantum};
