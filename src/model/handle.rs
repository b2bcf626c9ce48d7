/*!
 * Model Handle
 * Shared, reloadable slot for the learned policy's score model
 */

use super::linear::LinearModel;
use super::traits::{ModelError, ScoreModel};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Default)]
struct Slot {
    model: Option<Arc<dyn ScoreModel>>,
    source: Option<PathBuf>,
}

/// Cheaply clonable handle to the currently installed model
///
/// Readers take a snapshot `Arc` and never observe a swap mid-run; installs
/// and reloads are serialized behind the write lock.
#[derive(Clone, Default)]
pub struct ModelHandle {
    slot: Arc<RwLock<Slot>>,
}

impl ModelHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle pre-populated with `model`
    #[must_use]
    pub fn with_model(model: Arc<dyn ScoreModel>) -> Self {
        let handle = Self::new();
        handle.install(model);
        handle
    }

    /// Replace the current model
    pub fn install(&self, model: Arc<dyn ScoreModel>) {
        let description = model.describe();
        let mut slot = self.slot.write();
        slot.model = Some(model);
        slot.source = None;
        info!(model = %description, "Score model installed");
    }

    /// Load a linear model from disk and install it
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        let model = LinearModel::load(path)?;

        let mut slot = self.slot.write();
        slot.model = Some(Arc::new(model));
        slot.source = Some(path.to_path_buf());
        info!(path = %path.display(), "Score model loaded");
        Ok(())
    }

    /// Drop the current model; the learned policy becomes unavailable
    pub fn clear(&self) {
        let mut slot = self.slot.write();
        slot.model = None;
        slot.source = None;
    }

    /// Snapshot of the installed model
    #[must_use]
    pub fn current(&self) -> Option<Arc<dyn ScoreModel>> {
        self.slot.read().model.clone()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.slot.read().model.is_some()
    }

    /// File the current model was loaded from, if any
    #[must_use]
    pub fn source(&self) -> Option<PathBuf> {
        self.slot.read().source.clone()
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.read();
        f.debug_struct("ModelHandle")
            .field("loaded", &slot.model.is_some())
            .field("source", &slot.source)
            .finish()
    }
}
