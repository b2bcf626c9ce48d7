/*!
 * Model Module
 * Score models backing the learned scheduling policy
 */

pub mod handle;
pub mod linear;
pub mod traits;

// Re-export public API
pub use handle::ModelHandle;
pub use linear::{FeatureWeights, LinearModel};
pub use traits::{FeatureVector, ModelError, ScoreModel};
