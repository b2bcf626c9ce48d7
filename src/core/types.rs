/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process identifier, stable across a simulation run
pub type Pid = u32;

/// One discrete unit of simulated time
pub type Tick = u64;

/// Priority level (lower value is more important)
pub type Priority = i32;
