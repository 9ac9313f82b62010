//! Infrastructure layer: where trained artifacts are read from.
//!
//! The inference crate only knows the [`menuprofit_inference::ArtifactSource`]
//! trait; this crate provides the file-system and in-memory sources and the
//! JSON artifact formats they parse.

pub mod artifacts;

pub use artifacts::{
    DirectorySource, EmbeddedSource, DEFAULT_ENCODERS_FILE, DEFAULT_LABELS_FILE, DEFAULT_MODEL_FILE,
};
