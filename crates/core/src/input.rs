//! Raw request input and its validated, normalized form.

use serde::{Deserialize, Serialize};

use crate::field::FeatureField;
use crate::value_object::ValueObject;

/// Fields exactly as the caller supplied them.
///
/// Every field is optional so "not provided" can be reported per field instead
/// of failing deserialization as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub menu_category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl RawInput {
    pub fn new(
        restaurant_id: impl Into<String>,
        menu_category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            restaurant_id: Some(restaurant_id.into()),
            menu_category: Some(menu_category.into()),
            price: Some(price),
        }
    }

    /// Validate presence and trim the categorical fields.
    ///
    /// All problems are collected, in model column order, so the caller can
    /// re-prompt for every bad field at once.
    pub fn normalize(&self) -> Result<NormalizedInput, Vec<FieldIssue>> {
        let mut issues = Vec::new();

        let restaurant_id = required_text(
            FeatureField::RestaurantId,
            self.restaurant_id.as_deref(),
            &mut issues,
        );
        let menu_category = required_text(
            FeatureField::MenuCategory,
            self.menu_category.as_deref(),
            &mut issues,
        );

        let price = match self.price {
            None => {
                issues.push(FieldIssue::missing(FeatureField::Price));
                None
            }
            Some(p) if !p.is_finite() => {
                issues.push(FieldIssue::new(FeatureField::Price, "must be a finite number"));
                None
            }
            Some(p) if p < 0.0 => {
                issues.push(FieldIssue::new(FeatureField::Price, "must be >= 0"));
                None
            }
            Some(p) => Some(p),
        };

        match (restaurant_id, menu_category, price) {
            (Some(restaurant_id), Some(menu_category), Some(price)) if issues.is_empty() => {
                Ok(NormalizedInput {
                    restaurant_id,
                    menu_category,
                    price,
                })
            }
            _ => Err(issues),
        }
    }
}

fn required_text(
    field: FeatureField,
    value: Option<&str>,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            issues.push(FieldIssue::missing(field));
            None
        }
    }
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: FeatureField,
    pub reason: String,
}

impl FieldIssue {
    pub fn new(field: FeatureField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub fn missing(field: FeatureField) -> Self {
        Self::new(field, "is required")
    }
}

impl core::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Validated input: strings trimmed and non-empty, price finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInput {
    pub restaurant_id: String,
    pub menu_category: String,
    pub price: f64,
}

impl ValueObject for NormalizedInput {}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn padding() -> impl Strategy<Value = String> {
        "[ \t\n]{0,4}"
    }

    proptest! {
        #[test]
        fn padding_is_always_trimmed(
            id in "[A-Z][0-9A-Za-z ]{0,6}[0-9A-Za-z]",
            category in "[A-Z][a-z ]{0,8}[a-z]",
            left in padding(),
            right in padding(),
            price in 0.0f64..1_000.0,
        ) {
            let raw = RawInput::new(
                format!("{left}{id}{right}"),
                format!("{right}{category}{left}"),
                price,
            );
            let n = raw.normalize().unwrap();
            prop_assert_eq!(n.restaurant_id, id);
            prop_assert_eq!(n.menu_category, category);
            prop_assert_eq!(n.price, price);
        }

        #[test]
        fn negative_or_non_finite_price_is_rejected(
            price in prop_oneof![
                -1.0e12f64..-f64::MIN_POSITIVE,
                Just(f64::NAN),
                Just(f64::INFINITY),
                Just(f64::NEG_INFINITY),
            ],
        ) {
            let issues = RawInput::new("R001", "Desserts", price).normalize().unwrap_err();
            prop_assert_eq!(issues.len(), 1);
            prop_assert_eq!(issues[0].field, FeatureField::Price);
        }
    }
}
