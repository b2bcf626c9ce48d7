/*!
 * API Module
 * Service facade: simulate, generate, upload, compare and model status
 */

pub mod simulator;
pub mod types;

pub use simulator::Simulator;
pub use types::{ModelInfo, PolicyComparison, SimulateRequest, SimulateResponse};
