//! Frozen category vocabularies.

use std::collections::{BTreeMap, HashMap, HashSet};

use menuprofit_core::FeatureField;

use crate::error::{ArtifactKind, ArtifactLoadError, PredictionError};
use crate::features::CategoryCode;

/// Maps the known values of one categorical field to their training codes.
///
/// Read-only after construction. Lookups are exact (case-sensitive); callers
/// trim input beforehand.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    field: FeatureField,
    codes: HashMap<String, CategoryCode>,
}

impl CategoryEncoder {
    /// Build from a `value -> code` table.
    ///
    /// Rejects non-categorical fields, empty vocabularies, blank or untrimmed
    /// values (they could never match trimmed input) and duplicate codes.
    pub fn new(
        field: FeatureField,
        table: impl IntoIterator<Item = (String, u32)>,
    ) -> Result<Self, ArtifactLoadError> {
        if !field.is_categorical() {
            return Err(ArtifactLoadError::schema(
                ArtifactKind::Encoders,
                format!("{} is not a categorical column", field.column()),
            ));
        }

        let mut codes = HashMap::new();
        let mut seen_codes = HashSet::new();
        for (value, code) in table {
            if value.trim().is_empty() || value.trim() != value {
                return Err(ArtifactLoadError::schema(
                    ArtifactKind::Encoders,
                    format!(
                        "{}: category {value:?} is blank or has surrounding whitespace",
                        field.column()
                    ),
                ));
            }
            if !seen_codes.insert(code) {
                return Err(ArtifactLoadError::schema(
                    ArtifactKind::Encoders,
                    format!(
                        "{}: code {code} is assigned to more than one category",
                        field.column()
                    ),
                ));
            }
            if codes.insert(value.clone(), CategoryCode(code)).is_some() {
                return Err(ArtifactLoadError::schema(
                    ArtifactKind::Encoders,
                    format!("{}: category {value:?} appears twice", field.column()),
                ));
            }
        }

        if codes.is_empty() {
            return Err(ArtifactLoadError::schema(
                ArtifactKind::Encoders,
                format!("{}: vocabulary is empty", field.column()),
            ));
        }

        Ok(Self { field, codes })
    }

    /// Build from an ordered class list, code = position.
    pub fn from_classes<S: AsRef<str>>(
        field: FeatureField,
        classes: &[S],
    ) -> Result<Self, ArtifactLoadError> {
        Self::new(
            field,
            classes
                .iter()
                .enumerate()
                .map(|(i, c)| (c.as_ref().to_string(), i as u32)),
        )
    }

    pub fn field(&self) -> FeatureField {
        self.field
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn encode(&self, value: &str) -> Option<CategoryCode> {
        self.codes.get(value).copied()
    }

    /// Known values, ordered by code.
    pub fn vocabulary(&self) -> Vec<&str> {
        let mut entries: Vec<(&str, CategoryCode)> =
            self.codes.iter().map(|(v, c)| (v.as_str(), *c)).collect();
        entries.sort_by_key(|(_, c)| *c);
        entries.into_iter().map(|(v, _)| v).collect()
    }
}

/// One encoder per categorical field, exactly.
#[derive(Debug, Clone)]
pub struct CategoryEncoders {
    restaurant_id: CategoryEncoder,
    menu_category: CategoryEncoder,
}

impl CategoryEncoders {
    pub fn new(
        restaurant_id: CategoryEncoder,
        menu_category: CategoryEncoder,
    ) -> Result<Self, ArtifactLoadError> {
        for (expected, got) in [
            (FeatureField::RestaurantId, restaurant_id.field()),
            (FeatureField::MenuCategory, menu_category.field()),
        ] {
            if expected != got {
                return Err(ArtifactLoadError::schema(
                    ArtifactKind::Encoders,
                    format!("expected encoder for {}, got {}", expected.column(), got.column()),
                ));
            }
        }
        Ok(Self {
            restaurant_id,
            menu_category,
        })
    }

    /// Build from `column name -> (value -> code)` tables.
    ///
    /// Column names must match the trained schema exactly; missing or extra
    /// columns are a schema mismatch.
    pub fn from_tables(
        tables: BTreeMap<String, BTreeMap<String, u32>>,
    ) -> Result<Self, ArtifactLoadError> {
        let mut by_field: HashMap<FeatureField, CategoryEncoder> = HashMap::new();

        for (column, table) in tables {
            let field = FeatureField::from_column(&column)
                .filter(FeatureField::is_categorical)
                .ok_or_else(|| {
                    ArtifactLoadError::schema(
                        ArtifactKind::Encoders,
                        format!("unexpected encoder column {column:?}"),
                    )
                })?;
            by_field.insert(field, CategoryEncoder::new(field, table)?);
        }

        let mut take = |field: FeatureField| {
            by_field.remove(&field).ok_or_else(|| {
                ArtifactLoadError::schema(
                    ArtifactKind::Encoders,
                    format!("no encoder for column {}", field.column()),
                )
            })
        };
        let restaurant_id = take(FeatureField::RestaurantId)?;
        let menu_category = take(FeatureField::MenuCategory)?;

        Self::new(restaurant_id, menu_category)
    }

    pub fn get(&self, field: FeatureField) -> Option<&CategoryEncoder> {
        match field {
            FeatureField::RestaurantId => Some(&self.restaurant_id),
            FeatureField::MenuCategory => Some(&self.menu_category),
            FeatureField::Price => None,
        }
    }

    /// Look up `value` for `field`, failing with the allowed set when unseen.
    pub fn encode(
        &self,
        field: FeatureField,
        value: &str,
    ) -> Result<CategoryCode, PredictionError> {
        let encoder = self.get(field).ok_or_else(|| PredictionError::UnknownCategory {
            field,
            value: value.to_string(),
            allowed: Vec::new(),
        })?;

        encoder.encode(value).ok_or_else(|| PredictionError::UnknownCategory {
            field,
            value: value.to_string(),
            allowed: encoder.vocabulary().into_iter().map(str::to_string).collect(),
        })
    }
}
