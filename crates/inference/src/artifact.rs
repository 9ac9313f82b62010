use std::sync::Arc;

use crate::decoder::LabelDecoder;
use crate::encoder::CategoryEncoders;
use crate::error::ArtifactLoadError;
use crate::model::Classifier;

/// The three logical structures a training run produces.
#[derive(Clone)]
pub struct ArtifactBundle {
    pub classifier: Arc<dyn Classifier>,
    pub encoders: CategoryEncoders,
    pub decoder: LabelDecoder,
}

impl core::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("classifier", &self.classifier.name())
            .field("encoders", &self.encoders)
            .field("decoder", &self.decoder)
            .finish()
    }
}

/// Where trained artifacts come from (a directory, embedded blobs, ...).
///
/// This crate stays storage-agnostic: concrete sources live in the infra layer.
pub trait ArtifactSource: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Read and parse every artifact. Any missing, unreadable or malformed
    /// artifact fails the whole load.
    fn load(&self) -> Result<ArtifactBundle, ArtifactLoadError>;
}
