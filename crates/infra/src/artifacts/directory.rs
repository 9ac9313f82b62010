use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use menuprofit_inference::{ArtifactBundle, ArtifactKind, ArtifactLoadError, ArtifactSource};

use super::format::{parse_encoders, parse_labels, parse_model};
use super::{DEFAULT_ENCODERS_FILE, DEFAULT_LABELS_FILE, DEFAULT_MODEL_FILE};

/// Artifacts stored as files in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    dir: PathBuf,
    model_file: String,
    encoders_file: String,
    labels_file: String,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            encoders_file: DEFAULT_ENCODERS_FILE.to_string(),
            labels_file: DEFAULT_LABELS_FILE.to_string(),
        }
    }

    pub fn with_model_file(mut self, name: impl Into<String>) -> Self {
        self.model_file = name.into();
        self
    }

    pub fn with_encoders_file(mut self, name: impl Into<String>) -> Self {
        self.encoders_file = name.into();
        self
    }

    pub fn with_labels_file(mut self, name: impl Into<String>) -> Self {
        self.labels_file = name.into();
        self
    }

    pub fn path_of(&self, artifact: ArtifactKind) -> PathBuf {
        let name = match artifact {
            ArtifactKind::Model => &self.model_file,
            ArtifactKind::Encoders => &self.encoders_file,
            ArtifactKind::Labels => &self.labels_file,
        };
        self.dir.join(name)
    }

    fn read(&self, artifact: ArtifactKind) -> Result<Vec<u8>, ArtifactLoadError> {
        let path = self.path_of(artifact);
        debug!(artifact = %artifact, path = %path.display(), "reading artifact");

        std::fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ArtifactLoadError::Missing { artifact, path },
            _ => ArtifactLoadError::Io { artifact, path, source },
        })
    }
}

impl ArtifactSource for DirectorySource {
    fn describe(&self) -> String {
        format!("dir:{}", self.dir.display())
    }

    fn load(&self) -> Result<ArtifactBundle, ArtifactLoadError> {
        // Check presence of every file first so a missing artifact is reported
        // even when an earlier one is also malformed.
        for artifact in ArtifactKind::ALL {
            let path = self.path_of(artifact);
            if !path.exists() {
                return Err(ArtifactLoadError::Missing { artifact, path });
            }
        }

        Ok(ArtifactBundle {
            classifier: parse_model(&self.read(ArtifactKind::Model)?)?,
            encoders: parse_encoders(&self.read(ArtifactKind::Encoders)?)?,
            decoder: parse_labels(&self.read(ArtifactKind::Labels)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_names() {
        let src = DirectorySource::new("/srv/artifacts");
        assert_eq!(
            src.path_of(ArtifactKind::Model),
            PathBuf::from("/srv/artifacts/model.json")
        );
        assert_eq!(
            src.path_of(ArtifactKind::Encoders),
            PathBuf::from("/srv/artifacts/encoders.json")
        );
        assert_eq!(
            src.path_of(ArtifactKind::Labels),
            PathBuf::from("/srv/artifacts/labels.json")
        );
    }

    #[test]
    fn file_names_can_be_overridden() {
        let src = DirectorySource::new("a")
            .with_model_file("knn_final_model.json")
            .with_labels_file("profit.json");
        assert_eq!(src.path_of(ArtifactKind::Model), PathBuf::from("a/knn_final_model.json"));
        assert_eq!(src.path_of(ArtifactKind::Labels), PathBuf::from("a/profit.json"));
        assert_eq!(src.describe(), "dir:a");
    }

    #[test]
    fn nonexistent_directory_reports_missing_model() {
        let err = DirectorySource::new("/definitely/not/here").load().unwrap_err();
        assert!(matches!(
            err,
            ArtifactLoadError::Missing {
                artifact: ArtifactKind::Model,
                ..
            }
        ));
    }
}
