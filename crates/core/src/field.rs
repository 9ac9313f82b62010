//! Request fields and their model column names.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the three inputs a prediction is made from.
///
/// A field has two names: the snake-case request name used in error payloads
/// (`restaurant_id`) and the column name the classifier was trained on
/// (`RestaurantID`). Column names are case-sensitive and their order is fixed by
/// [`FeatureField::MODEL_ORDER`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    RestaurantId,
    MenuCategory,
    Price,
}

impl FeatureField {
    /// Column order of the encoded feature row.
    pub const MODEL_ORDER: [FeatureField; 3] = [
        FeatureField::RestaurantId,
        FeatureField::MenuCategory,
        FeatureField::Price,
    ];

    /// Request-facing name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureField::RestaurantId => "restaurant_id",
            FeatureField::MenuCategory => "menu_category",
            FeatureField::Price => "price",
        }
    }

    /// Column name in the trained model's schema.
    pub fn column(&self) -> &'static str {
        match self {
            FeatureField::RestaurantId => "RestaurantID",
            FeatureField::MenuCategory => "MenuCategory",
            FeatureField::Price => "Price",
        }
    }

    pub fn is_categorical(&self) -> bool {
        !matches!(self, FeatureField::Price)
    }

    /// Resolve a model column name (exact match).
    pub fn from_column(column: &str) -> Option<Self> {
        Self::MODEL_ORDER.into_iter().find(|f| f.column() == column)
    }
}

impl core::fmt::Display for FeatureField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::MODEL_ORDER
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DomainError::invalid_field(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_order_matches_trained_columns() {
        let columns: Vec<&str> = FeatureField::MODEL_ORDER.iter().map(|f| f.column()).collect();
        assert_eq!(columns, vec!["RestaurantID", "MenuCategory", "Price"]);
    }

    #[test]
    fn column_lookup_is_case_sensitive() {
        assert_eq!(FeatureField::from_column("MenuCategory"), Some(FeatureField::MenuCategory));
        assert_eq!(FeatureField::from_column("menucategory"), None);
        assert_eq!(FeatureField::from_column("Restaurant ID"), None);
    }

    #[test]
    fn request_names_round_trip_through_from_str() {
        for field in FeatureField::MODEL_ORDER {
            assert_eq!(field.as_str().parse::<FeatureField>().unwrap(), field);
        }
        assert!("RestaurantID".parse::<FeatureField>().is_err());
    }

    #[test]
    fn serializes_as_request_name() {
        let json = serde_json::to_string(&FeatureField::RestaurantId).unwrap();
        assert_eq!(json, "\"restaurant_id\"");
    }
}
