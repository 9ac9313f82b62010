//! Class code -> profitability label.

use std::collections::{BTreeMap, HashSet};

use menuprofit_core::ProfitLabel;

use crate::error::{ArtifactKind, ArtifactLoadError};
use crate::features::ClassCode;

/// Inverse of the training-time label encoding.
///
/// Always covers each of `Low`, `Medium`, `High` exactly once, so a decoded
/// prediction can never be anything but one of the three labels.
#[derive(Debug, Clone)]
pub struct LabelDecoder {
    labels: BTreeMap<ClassCode, ProfitLabel>,
}

impl LabelDecoder {
    pub fn new(
        entries: impl IntoIterator<Item = (u32, ProfitLabel)>,
    ) -> Result<Self, ArtifactLoadError> {
        let mut labels = BTreeMap::new();
        let mut seen = HashSet::new();

        for (code, label) in entries {
            if !seen.insert(label) {
                return Err(ArtifactLoadError::schema(
                    ArtifactKind::Labels,
                    format!("label {label} is mapped from more than one code"),
                ));
            }
            if labels.insert(ClassCode(code), label).is_some() {
                return Err(ArtifactLoadError::schema(
                    ArtifactKind::Labels,
                    format!("code {code} appears twice"),
                ));
            }
        }

        let missing: Vec<&str> = ProfitLabel::ALL
            .iter()
            .filter(|l| !seen.contains(*l))
            .map(|l| l.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(ArtifactLoadError::schema(
                ArtifactKind::Labels,
                format!("no code for label(s): {}", missing.join(", ")),
            ));
        }

        Ok(Self { labels })
    }

    /// Build from a serialized `"code" -> "Label"` table.
    pub fn from_table(table: BTreeMap<String, String>) -> Result<Self, ArtifactLoadError> {
        let mut entries = Vec::with_capacity(table.len());
        for (code, label) in table {
            let code: u32 = code.trim().parse().map_err(|_| {
                ArtifactLoadError::corrupt(
                    ArtifactKind::Labels,
                    format!("class code {code:?} is not an integer"),
                )
            })?;
            let label: ProfitLabel = label.parse().map_err(|e| {
                ArtifactLoadError::schema(ArtifactKind::Labels, format!("code {code}: {e}"))
            })?;
            entries.push((code, label));
        }
        Self::new(entries)
    }

    /// Build from an ordered class list, code = position (sorted training labels).
    pub fn from_classes(classes: &[ProfitLabel]) -> Result<Self, ArtifactLoadError> {
        Self::new(classes.iter().enumerate().map(|(i, l)| (i as u32, *l)))
    }

    pub fn decode(&self, code: ClassCode) -> Option<ProfitLabel> {
        self.labels.get(&code).copied()
    }

    pub fn code_of(&self, label: ProfitLabel) -> Option<ClassCode> {
        self.labels.iter().find(|(_, l)| **l == label).map(|(c, _)| *c)
    }

    pub fn codes(&self) -> impl Iterator<Item = ClassCode> + '_ {
        self.labels.keys().copied()
    }
}
