//! Profitability labels.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// The only values a prediction may carry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfitLabel {
    Low,
    Medium,
    High,
}

impl ProfitLabel {
    pub const ALL: [ProfitLabel; 3] = [ProfitLabel::Low, ProfitLabel::Medium, ProfitLabel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfitLabel::Low => "Low",
            ProfitLabel::Medium => "Medium",
            ProfitLabel::High => "High",
        }
    }
}

impl ValueObject for ProfitLabel {}

impl core::fmt::Display for ProfitLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse. `"high"` is rejected so a drifted artifact is
/// caught at load time rather than rendered.
impl FromStr for ProfitLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(ProfitLabel::Low),
            "Medium" => Ok(ProfitLabel::Medium),
            "High" => Ok(ProfitLabel::High),
            other => Err(DomainError::invalid_label(format!(
                "{other:?} (expected one of: Low, Medium, High)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_names_only() {
        assert_eq!("Medium".parse::<ProfitLabel>().unwrap(), ProfitLabel::Medium);
        assert!("medium".parse::<ProfitLabel>().is_err());
        assert!(" High".parse::<ProfitLabel>().is_err());
        assert!("2".parse::<ProfitLabel>().is_err());
    }

    #[test]
    fn serde_uses_label_names() {
        assert_eq!(serde_json::to_string(&ProfitLabel::High).unwrap(), "\"High\"");
        let parsed: ProfitLabel = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(parsed, ProfitLabel::Low);
    }
}
