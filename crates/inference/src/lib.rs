//! `menuprofit-inference`
//!
//! **Responsibility:** turn one raw request into one profitability label, or a
//! structured failure.
//!
//! - Artifacts (classifier, category encoders, label decoder) are loaded once
//!   through an [`ArtifactSource`] and are read-only afterwards.
//! - [`InferencePipeline::predict`] is side-effect free and safe to call
//!   concurrently through a shared reference.
//! - Unseen categories fail fast; they are never mapped to a default code.

pub mod artifact;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod features;
pub mod handle;
pub mod model;
pub mod pipeline;

pub use artifact::{ArtifactBundle, ArtifactSource};
pub use decoder::LabelDecoder;
pub use encoder::{CategoryEncoder, CategoryEncoders};
pub use error::{ArtifactKind, ArtifactLoadError, ModelError, PredictionError};
pub use features::{CategoryCode, ClassCode, EncodedFeatures};
pub use handle::{PipelineHandle, PipelineState};
pub use model::{
    Classifier, DistanceMetric, KnnClassifier, KnnParams, KnnSample, NeighborWeights,
    StandardScaler,
};
pub use pipeline::{InferencePipeline, Prediction};
