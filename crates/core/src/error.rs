//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Keep this focused on deterministic, input-shaped failures. Artifact IO and
/// model failures belong to the inference layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A string did not name one of the known profitability labels.
    #[error("invalid label: {0}")]
    InvalidLabel(String),

    /// A string did not name one of the known feature fields.
    #[error("invalid field: {0}")]
    InvalidField(String),
}

impl DomainError {
    pub fn invalid_label(msg: impl Into<String>) -> Self {
        Self::InvalidLabel(msg.into())
    }

    pub fn invalid_field(msg: impl Into<String>) -> Self {
        Self::InvalidField(msg.into())
    }
}
