use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use menuprofit_core::{FeatureField, NormalizedInput, ProfitLabel, RawInput, ValueObject};

use crate::artifact::{ArtifactBundle, ArtifactSource};
use crate::decoder::LabelDecoder;
use crate::encoder::CategoryEncoders;
use crate::error::{ArtifactKind, ArtifactLoadError, PredictionError};
use crate::features::EncodedFeatures;
use crate::model::Classifier;

/// Outcome of a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: ProfitLabel,
    /// The trimmed input the label was computed from.
    pub input: NormalizedInput,
}

impl ValueObject for Prediction {}

/// Frozen model + encoders + decoder, ready to serve.
///
/// Shared read-only across requests (`Arc<InferencePipeline>`); `predict`
/// takes `&self` and has no side effects.
pub struct InferencePipeline {
    classifier: Arc<dyn Classifier>,
    encoders: CategoryEncoders,
    decoder: LabelDecoder,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl InferencePipeline {
    /// Load every artifact from `source` and check it against the trained schema.
    pub fn initialize(source: &dyn ArtifactSource) -> Result<Self, ArtifactLoadError> {
        let description = source.describe();
        let bundle = source.load()?;
        let pipeline = Self::from_bundle(bundle, description)?;

        info!(
            source = %pipeline.source,
            classifier = pipeline.classifier.name(),
            samples = pipeline.classifier.sample_count(),
            restaurants = pipeline.vocabulary(FeatureField::RestaurantId).len(),
            categories = pipeline.vocabulary(FeatureField::MenuCategory).len(),
            "inference pipeline ready"
        );
        Ok(pipeline)
    }

    /// Assemble a pipeline from already-built parts (alternative model backends, tests).
    pub fn from_parts(
        classifier: Arc<dyn Classifier>,
        encoders: CategoryEncoders,
        decoder: LabelDecoder,
    ) -> Result<Self, ArtifactLoadError> {
        Self::from_bundle(
            ArtifactBundle {
                classifier,
                encoders,
                decoder,
            },
            "in-process".to_string(),
        )
    }

    fn from_bundle(bundle: ArtifactBundle, source: String) -> Result<Self, ArtifactLoadError> {
        let expected = EncodedFeatures::columns();
        let actual = bundle.classifier.feature_columns();
        if actual.len() != expected.len() || actual.iter().zip(expected).any(|(a, e)| a != e) {
            return Err(ArtifactLoadError::schema(
                ArtifactKind::Model,
                format!("model was trained on columns {actual:?}, expected {expected:?}"),
            ));
        }

        Ok(Self {
            classifier: bundle.classifier,
            encoders: bundle.encoders,
            decoder: bundle.decoder,
            source,
            loaded_at: Utc::now(),
        })
    }

    /// Validate, normalize, encode, classify, decode.
    pub fn predict(&self, raw: &RawInput) -> Result<Prediction, PredictionError> {
        let input = raw
            .normalize()
            .map_err(|issues| PredictionError::Validation { issues })?;

        let features = self.encode(&input)?;
        let code = self.classifier.predict(&features)?;

        let label = self.decoder.decode(code).ok_or_else(|| {
            warn!(
                code = %code,
                classifier = self.classifier.name(),
                "classifier returned a code the label decoder does not know"
            );
            PredictionError::Decode { code }
        })?;

        debug!(
            restaurant_id = %input.restaurant_id,
            menu_category = %input.menu_category,
            price = input.price,
            label = %label,
            "prediction"
        );
        Ok(Prediction { label, input })
    }

    /// Encode a normalized input in the model's column order.
    ///
    /// The restaurant is checked before the category, so with two unknown
    /// values the error names `restaurant_id`.
    pub fn encode(&self, input: &NormalizedInput) -> Result<EncodedFeatures, PredictionError> {
        Ok(EncodedFeatures {
            restaurant_id: self.encoders.encode(FeatureField::RestaurantId, &input.restaurant_id)?,
            menu_category: self.encoders.encode(FeatureField::MenuCategory, &input.menu_category)?,
            price: input.price,
        })
    }

    /// Known values for a categorical field, ordered by code. Empty for `Price`.
    pub fn vocabulary(&self, field: FeatureField) -> Vec<&str> {
        self.encoders
            .get(field)
            .map(|e| e.vocabulary())
            .unwrap_or_default()
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl core::fmt::Debug for InferencePipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InferencePipeline")
            .field("classifier", &self.classifier.name())
            .field("source", &self.source)
            .field("loaded_at", &self.loaded_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::encoder::CategoryEncoder;
    use crate::error::ModelError;
    use crate::features::ClassCode;

    pub const RESTAURANTS: [&str; 3] = ["R001", "R002", "R003"];
    pub const CATEGORIES: [&str; 4] = ["Appetizers", "Beverages", "Desserts", "Main Course"];

    /// Returns a fixed code and counts how often it was asked.
    pub struct StubClassifier {
        pub code: ClassCode,
        pub calls: AtomicUsize,
        columns: Vec<String>,
    }

    impl StubClassifier {
        pub fn returning(code: u32) -> Self {
            Self::with_columns(code, &EncodedFeatures::columns())
        }

        pub fn with_columns(code: u32, columns: &[&str]) -> Self {
            Self {
                code: ClassCode(code),
                calls: AtomicUsize::new(0),
                columns: columns.iter().map(|c| c.to_string()).collect(),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Classifier for StubClassifier {
        fn name(&self) -> &str {
            "stub"
        }

        fn feature_columns(&self) -> &[String] {
            &self.columns
        }

        fn predict(&self, _features: &EncodedFeatures) -> Result<ClassCode, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.code)
        }
    }

    /// Price-threshold classifier: < 8 High, < 16 Medium, else Low (sorted label codes).
    pub struct PriceBands;

    impl Classifier for PriceBands {
        fn name(&self) -> &str {
            "price-bands"
        }

        fn feature_columns(&self) -> &[String] {
            static COLUMNS: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
            COLUMNS.get_or_init(|| {
                EncodedFeatures::columns()
                    .iter()
                    .map(|c| c.to_string())
                    .collect()
            })
        }

        fn predict(&self, features: &EncodedFeatures) -> Result<ClassCode, ModelError> {
            Ok(match features.price {
                p if p < 8.0 => ClassCode(0),
                p if p < 16.0 => ClassCode(2),
                _ => ClassCode(1),
            })
        }
    }

    pub fn encoders() -> CategoryEncoders {
        CategoryEncoders::new(
            CategoryEncoder::from_classes(FeatureField::RestaurantId, &RESTAURANTS).unwrap(),
            CategoryEncoder::from_classes(FeatureField::MenuCategory, &CATEGORIES).unwrap(),
        )
        .unwrap()
    }

    pub fn decoder() -> LabelDecoder {
        LabelDecoder::from_classes(&[ProfitLabel::High, ProfitLabel::Low, ProfitLabel::Medium])
            .unwrap()
    }

    pub fn pipeline_with(classifier: Arc<dyn Classifier>) -> InferencePipeline {
        InferencePipeline::from_parts(classifier, encoders(), decoder()).unwrap()
    }
}
