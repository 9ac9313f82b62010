//! Classifier seam and the k-nearest-neighbours model behind it.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::features::{ClassCode, EncodedFeatures};

/// A trained single-row classifier.
///
/// Implementations must be deterministic and must not mutate state in
/// `predict`; the pipeline shares one instance across concurrent requests.
pub trait Classifier: Send + Sync + 'static {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Column names the model was trained on, in training order.
    fn feature_columns(&self) -> &[String];

    /// Number of training rows the model carries, when that is meaningful.
    fn sample_count(&self) -> Option<usize> {
        None
    }

    fn predict(&self, features: &EncodedFeatures) -> Result<ClassCode, ModelError>;
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborWeights {
    #[default]
    Uniform,
    /// Inverse distance. Exact matches (distance 0) outvote everything else.
    Distance,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
}

impl DistanceMetric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| {
                    let d = x - y;
                    d * d
                })
                .sum::<f64>()
                .sqrt(),
            DistanceMetric::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
        }
    }
}

/// Per-column standardization applied before distances are measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| {
                // Constant training columns are only centred.
                let s = if *s == 0.0 { 1.0 } else { *s };
                (x - m) / s
            })
            .collect()
    }
}

/// One stored training point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnSample {
    pub features: Vec<f64>,
    pub label: ClassCode,
}

fn default_neighbors() -> usize {
    5
}

/// Serialized k-NN parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnParams {
    pub feature_columns: Vec<String>,
    #[serde(default = "default_neighbors")]
    pub n_neighbors: usize,
    #[serde(default)]
    pub weights: NeighborWeights,
    #[serde(default)]
    pub metric: DistanceMetric,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    pub samples: Vec<KnnSample>,
}

/// Majority vote among the `n_neighbors` closest training samples.
///
/// Deterministic: neighbours are ordered by `(distance, sample index)` and vote
/// ties resolve to the smallest class code.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    params: KnnParams,
    /// Training features after scaling, computed once.
    points: Vec<Vec<f64>>,
}

impl KnnClassifier {
    pub fn new(params: KnnParams) -> Result<Self, ModelError> {
        let width = params.feature_columns.len();

        if width == 0 {
            return Err(ModelError::InvalidParams("no feature columns".into()));
        }
        if params.n_neighbors == 0 {
            return Err(ModelError::InvalidParams("n_neighbors must be >= 1".into()));
        }
        if params.samples.is_empty() {
            return Err(ModelError::InvalidParams("no training samples".into()));
        }
        if let Some(scaler) = &params.scaler {
            if scaler.mean.len() != width || scaler.scale.len() != width {
                return Err(ModelError::InvalidParams(format!(
                    "scaler has {}/{} parameters for {width} columns",
                    scaler.mean.len(),
                    scaler.scale.len()
                )));
            }
            if scaler.mean.iter().chain(&scaler.scale).any(|v| !v.is_finite()) {
                return Err(ModelError::InvalidParams("scaler parameters must be finite".into()));
            }
        }
        for (i, sample) in params.samples.iter().enumerate() {
            if sample.features.len() != width {
                return Err(ModelError::InvalidParams(format!(
                    "sample {i} has {} features, expected {width}",
                    sample.features.len()
                )));
            }
            if sample.features.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::InvalidParams(format!(
                    "sample {i} has a non-finite feature"
                )));
            }
        }

        let points = params
            .samples
            .iter()
            .map(|s| match &params.scaler {
                Some(scaler) => scaler.transform(&s.features),
                None => s.features.clone(),
            })
            .collect();

        Ok(Self { params, points })
    }

    fn vote(&self, row: &[f64]) -> ClassCode {
        let mut neighbours: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (self.params.metric.distance(row, p), i))
            .collect();
        neighbours.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        neighbours.truncate(self.params.n_neighbors.min(self.points.len()));

        let exact_match = neighbours.iter().any(|(d, _)| *d == 0.0);
        let mut scores: BTreeMap<ClassCode, f64> = BTreeMap::new();
        for (d, i) in &neighbours {
            let weight = match self.params.weights {
                NeighborWeights::Uniform => 1.0,
                NeighborWeights::Distance if exact_match => {
                    if *d == 0.0 {
                        1.0
                    } else {
                        0.0
                    }
                }
                NeighborWeights::Distance => 1.0 / d,
            };
            *scores.entry(self.params.samples[*i].label).or_insert(0.0) += weight;
        }

        // BTreeMap iterates codes ascending; keep the first maximum.
        let mut best: Option<(ClassCode, f64)> = None;
        for (code, score) in scores {
            match best {
                Some((_, s)) if score.partial_cmp(&s) != Some(Ordering::Greater) => {}
                _ => best = Some((code, score)),
            }
        }

        // `new` guarantees at least one sample and k >= 1.
        best.map(|(c, _)| c).unwrap_or(self.params.samples[0].label)
    }
}

impl Classifier for KnnClassifier {
    fn name(&self) -> &str {
        "knn"
    }

    fn feature_columns(&self) -> &[String] {
        &self.params.feature_columns
    }

    fn sample_count(&self) -> Option<usize> {
        Some(self.params.samples.len())
    }

    fn predict(&self, features: &EncodedFeatures) -> Result<ClassCode, ModelError> {
        let row = features.to_row();
        if row.len() != self.params.feature_columns.len() {
            return Err(ModelError::Shape {
                expected: self.params.feature_columns.len(),
                got: row.len(),
            });
        }
        if let Some(i) = row.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite {
                column: self.params.feature_columns[i].clone(),
            });
        }

        let row = match &self.params.scaler {
            Some(scaler) => scaler.transform(&row),
            None => row.to_vec(),
        };
        Ok(self.vote(&row))
    }
}
