use std::path::PathBuf;

use menuprofit_core::{FeatureField, FieldIssue};
use thiserror::Error;

use crate::features::ClassCode;

/// Which of the three artifacts a load failure concerns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Model,
    Encoders,
    Labels,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Model,
        ArtifactKind::Encoders,
        ArtifactKind::Labels,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Encoders => "encoders",
            ArtifactKind::Labels => "labels",
        }
    }
}

impl core::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Startup failure: the pipeline cannot serve any request.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("{artifact} artifact not found at {}", .path.display())]
    Missing { artifact: ArtifactKind, path: PathBuf },

    #[error("failed to read {artifact} artifact at {}: {source}", .path.display())]
    Io {
        artifact: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{artifact} artifact is corrupt: {reason}")]
    Corrupt { artifact: ArtifactKind, reason: String },

    #[error("{artifact} artifact does not match the expected schema: {reason}")]
    SchemaMismatch { artifact: ArtifactKind, reason: String },
}

impl ArtifactLoadError {
    pub fn corrupt(artifact: ArtifactKind, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            artifact,
            reason: reason.into(),
        }
    }

    pub fn schema(artifact: ArtifactKind, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            artifact,
            reason: reason.into(),
        }
    }

    pub fn artifact(&self) -> ArtifactKind {
        match self {
            ArtifactLoadError::Missing { artifact, .. }
            | ArtifactLoadError::Io { artifact, .. }
            | ArtifactLoadError::Corrupt { artifact, .. }
            | ArtifactLoadError::SchemaMismatch { artifact, .. } => *artifact,
        }
    }
}

/// Failure raised by a classifier while scoring one row.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid model parameters: {0}")]
    InvalidParams(String),

    #[error("feature row has {got} values, model expects {expected}")]
    Shape { expected: usize, got: usize },

    #[error("feature {column} is not a finite number")]
    NonFinite { column: String },
}

/// Request-scoped prediction failure. None of these affect other requests.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    /// One or more required fields were missing or invalid. The model was not called.
    #[error("invalid input: {}", join_issues(.issues))]
    Validation { issues: Vec<FieldIssue> },

    /// A categorical value is not part of the trained vocabulary.
    #[error("unknown {field} {value:?}")]
    UnknownCategory {
        field: FeatureField,
        value: String,
        allowed: Vec<String>,
    },

    /// The classifier returned a code the label decoder has no entry for.
    /// Indicates encoder/decoder/model drift between training runs.
    #[error("model returned class code {code} which has no label")]
    Decode { code: ClassCode },

    #[error("model failed: {0}")]
    Model(#[from] ModelError),

    #[error("inference pipeline is not initialized")]
    NotReady,
}

impl PredictionError {
    /// Stable machine-readable kind, used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Validation { .. } => "validation_error",
            PredictionError::UnknownCategory { .. } => "unknown_category",
            PredictionError::Decode { .. } => "decode_error",
            PredictionError::Model(_) => "model_error",
            PredictionError::NotReady => "not_ready",
        }
    }

    /// The offending field, when there is exactly one.
    pub fn field(&self) -> Option<FeatureField> {
        match self {
            PredictionError::UnknownCategory { field, .. } => Some(*field),
            PredictionError::Validation { issues } if issues.len() == 1 => Some(issues[0].field),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            PredictionError::UnknownCategory { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Whether the caller can fix this by changing its input.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            PredictionError::Validation { .. } | PredictionError::UnknownCategory { .. }
        )
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}
