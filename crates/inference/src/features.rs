//! Encoded feature row and the integer codes artifacts speak in.

use menuprofit_core::FeatureField;
use serde::{Deserialize, Serialize};

/// Integer code of a category value, assigned at training time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCode(pub u32);

/// Integer code of a predicted class, as emitted by the classifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassCode(pub u32);

impl core::fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::fmt::Display for ClassCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Single numeric row fed to the classifier.
///
/// The only canonical schema: `RestaurantID`, `MenuCategory`, `Price`, in that
/// order (see [`FeatureField::MODEL_ORDER`]).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatures {
    pub restaurant_id: CategoryCode,
    pub menu_category: CategoryCode,
    pub price: f64,
}

impl EncodedFeatures {
    pub const WIDTH: usize = 3;

    pub fn columns() -> [&'static str; Self::WIDTH] {
        FeatureField::MODEL_ORDER.map(|f| f.column())
    }

    pub fn to_row(&self) -> [f64; Self::WIDTH] {
        FeatureField::MODEL_ORDER.map(|f| self.get(f))
    }

    pub fn get(&self, field: FeatureField) -> f64 {
        match field {
            FeatureField::RestaurantId => f64::from(self.restaurant_id.0),
            FeatureField::MenuCategory => f64::from(self.menu_category.0),
            FeatureField::Price => self.price,
        }
    }
}
