//! Artifact sources and formats.
//!
//! A training run produces three files:
//! - `model.json`: the classifier (currently `{"kind": "knn", ...}`)
//! - `encoders.json`: `column -> (category -> code)`
//! - `labels.json`: `code -> label`

pub mod directory;
pub mod embedded;
pub mod format;

pub use directory::DirectorySource;
pub use embedded::EmbeddedSource;
pub use format::{parse_bundle, parse_encoders, parse_labels, parse_model, ModelArtifact};

pub const DEFAULT_MODEL_FILE: &str = "model.json";
pub const DEFAULT_ENCODERS_FILE: &str = "encoders.json";
pub const DEFAULT_LABELS_FILE: &str = "labels.json";
