/*!
 * Workload Sources
 * Synthetic generation and file parsing
 */

pub mod generator;
pub mod parser;

pub use generator::{generate_workload, BurstDistribution, GeneratorConfig};
pub use parser::{load_workload, parse_csv, parse_json, parse_upload, WorkloadFormat};
