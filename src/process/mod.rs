/*!
 * Process Module
 * Process descriptions, runtime records and workloads
 */

pub mod types;
mod validation;
pub mod workload;

// Re-export public API
pub use types::{Process, ProcessRecord, ProcessSummary};
pub use workload::{Workload, WorkloadRow};
