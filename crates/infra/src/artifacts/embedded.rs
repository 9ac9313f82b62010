use std::borrow::Cow;

use menuprofit_inference::{ArtifactBundle, ArtifactLoadError, ArtifactSource};

use super::format::parse_bundle;

/// Artifacts held in memory, e.g. compiled in with `include_bytes!`.
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    model: Cow<'static, [u8]>,
    encoders: Cow<'static, [u8]>,
    labels: Cow<'static, [u8]>,
}

impl EmbeddedSource {
    pub fn new(model: &'static [u8], encoders: &'static [u8], labels: &'static [u8]) -> Self {
        Self {
            model: Cow::Borrowed(model),
            encoders: Cow::Borrowed(encoders),
            labels: Cow::Borrowed(labels),
        }
    }

    pub fn from_owned(model: Vec<u8>, encoders: Vec<u8>, labels: Vec<u8>) -> Self {
        Self {
            model: Cow::Owned(model),
            encoders: Cow::Owned(encoders),
            labels: Cow::Owned(labels),
        }
    }
}

impl ArtifactSource for EmbeddedSource {
    fn describe(&self) -> String {
        format!(
            "embedded:{}+{}+{} bytes",
            self.model.len(),
            self.encoders.len(),
            self.labels.len()
        )
    }

    fn load(&self) -> Result<ArtifactBundle, ArtifactLoadError> {
        parse_bundle(&self.model, &self.encoders, &self.labels)
    }
}
