//! JSON artifact formats.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use menuprofit_inference::{
    ArtifactBundle, ArtifactKind, ArtifactLoadError, CategoryEncoders, Classifier, KnnClassifier,
    KnnParams, LabelDecoder,
};

/// Serialized classifier, tagged by model family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Knn(KnnParams),
}

impl ModelArtifact {
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>, ArtifactLoadError> {
        match self {
            ModelArtifact::Knn(params) => {
                let knn = KnnClassifier::new(params)
                    .map_err(|e| ArtifactLoadError::corrupt(ArtifactKind::Model, e.to_string()))?;
                Ok(Arc::new(knn))
            }
        }
    }
}

fn decode_json<'a, T: Deserialize<'a>>(
    artifact: ArtifactKind,
    bytes: &'a [u8],
) -> Result<T, ArtifactLoadError> {
    serde_json::from_slice(bytes).map_err(|e| ArtifactLoadError::corrupt(artifact, e.to_string()))
}

pub fn parse_model(bytes: &[u8]) -> Result<Arc<dyn Classifier>, ArtifactLoadError> {
    decode_json::<ModelArtifact>(ArtifactKind::Model, bytes)?.into_classifier()
}

pub fn parse_encoders(bytes: &[u8]) -> Result<CategoryEncoders, ArtifactLoadError> {
    let tables: BTreeMap<String, BTreeMap<String, u32>> =
        decode_json(ArtifactKind::Encoders, bytes)?;
    CategoryEncoders::from_tables(tables)
}

pub fn parse_labels(bytes: &[u8]) -> Result<LabelDecoder, ArtifactLoadError> {
    let table: BTreeMap<String, String> = decode_json(ArtifactKind::Labels, bytes)?;
    LabelDecoder::from_table(table)
}

pub fn parse_bundle(
    model: &[u8],
    encoders: &[u8],
    labels: &[u8],
) -> Result<ArtifactBundle, ArtifactLoadError> {
    Ok(ArtifactBundle {
        classifier: parse_model(model)?,
        encoders: parse_encoders(encoders)?,
        decoder: parse_labels(labels)?,
    })
}
