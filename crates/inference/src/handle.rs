use std::sync::{Arc, Mutex, OnceLock};

use menuprofit_core::RawInput;
use tracing::{error, info};

use crate::artifact::ArtifactSource;
use crate::error::{ArtifactLoadError, PredictionError};
use crate::pipeline::{InferencePipeline, Prediction};

/// Lifecycle of a [`PipelineHandle`].
///
/// There is no teardown state: once `Ready`, a handle stays ready until the
/// owning process exits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Uninitialized,
    Ready,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Uninitialized => "uninitialized",
            PipelineState::Ready => "ready",
        }
    }
}

/// Owned slot holding the process's pipeline.
///
/// Constructed by the hosting process and passed to request handlers; cloning
/// shares the same slot. Artifacts are loaded at most once per slot.
#[derive(Debug, Clone, Default)]
pub struct PipelineHandle {
    inner: Arc<Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    pipeline: OnceLock<Arc<InferencePipeline>>,
    /// Serializes loads so concurrent `initialize` calls read artifacts once.
    init: Mutex<()>,
}

impl PipelineHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that is already `Ready`.
    pub fn ready(pipeline: InferencePipeline) -> Self {
        let handle = Self::new();
        handle.install(pipeline);
        handle
    }

    pub fn state(&self) -> PipelineState {
        match self.inner.pipeline.get() {
            Some(_) => PipelineState::Ready,
            None => PipelineState::Uninitialized,
        }
    }

    pub fn get(&self) -> Option<Arc<InferencePipeline>> {
        self.inner.pipeline.get().cloned()
    }

    /// Load from `source` unless already ready; later calls reuse the loaded
    /// pipeline and never touch `source`. On failure the handle stays
    /// `Uninitialized`.
    pub fn initialize(
        &self,
        source: &dyn ArtifactSource,
    ) -> Result<Arc<InferencePipeline>, ArtifactLoadError> {
        if let Some(p) = self.get() {
            return Ok(p);
        }

        let _guard = self.inner.init.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(p) = self.get() {
            return Ok(p);
        }

        match InferencePipeline::initialize(source) {
            Ok(pipeline) => Ok(self.install(pipeline)),
            Err(e) => {
                error!(
                    source = %source.describe(),
                    error = %e,
                    "failed to load inference artifacts"
                );
                Err(e)
            }
        }
    }

    /// Move a pipeline into the slot. If the slot is already ready the given
    /// pipeline is dropped and the existing one returned.
    pub fn install(&self, pipeline: InferencePipeline) -> Arc<InferencePipeline> {
        let fresh = Arc::new(pipeline);
        let installed = self.inner.pipeline.get_or_init(|| fresh.clone()).clone();
        if !Arc::ptr_eq(&installed, &fresh) {
            info!("inference pipeline already installed; keeping the existing one");
        }
        installed
    }

    pub fn predict(&self, raw: &RawInput) -> Result<Prediction, PredictionError> {
        match self.inner.pipeline.get() {
            Some(p) => p.predict(raw),
            None => Err(PredictionError::NotReady),
        }
    }
}
