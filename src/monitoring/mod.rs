/*!
 * Monitoring Module
 * Run metrics and tracing setup
 */

pub mod metrics;
pub mod tracer;

pub use metrics::{Metrics, MetricsCalculator, ProcessMetrics};
pub use tracer::init_tracing;
