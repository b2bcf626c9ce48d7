/*!
 * Core Module
 * Shared types, errors, limits and configuration
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::SimConfig;
pub use errors::{SimError, SimResult};
pub use types::{Pid, Priority, Tick};
