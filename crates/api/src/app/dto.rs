use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use menuprofit_core::{FeatureField, FieldIssue, NormalizedInput, ProfitLabel, RawInput};
use menuprofit_inference::{InferencePipeline, PipelineState, Prediction};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /predict`.
///
/// Fields are kept as raw JSON so that absence and wrong types are both
/// reported as validation problems naming the field; only a body that is not
/// a JSON object is rejected (see [`PredictRequest::from_body`]).
#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub restaurant_id: Option<Value>,
    #[serde(default)]
    pub menu_category: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl PredictRequest {
    /// Accept any JSON object. Arrays and scalars are rejected even though the
    /// derived impl would read an array positionally.
    pub fn from_body(body: Value) -> Result<Self, String> {
        match body {
            Value::Object(_) => serde_json::from_value(body).map_err(|e| e.to_string()),
            other => Err(format!("expected a JSON object, got {}", json_kind(&other))),
        }
    }

    /// Split the body into the typed input and any per-field type problems.
    ///
    /// A field with the wrong JSON type is left out of the [`RawInput`] and
    /// reported here instead.
    pub fn into_raw(self) -> (RawInput, Vec<FieldIssue>) {
        let mut issues = Vec::new();
        let restaurant_id = text_field(FeatureField::RestaurantId, self.restaurant_id, &mut issues);
        let menu_category = text_field(FeatureField::MenuCategory, self.menu_category, &mut issues);
        let price = match self.price {
            None => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(_) => {
                issues.push(FieldIssue::new(FeatureField::Price, "must be a number"));
                None
            }
        };

        (
            RawInput {
                restaurant_id,
                menu_category,
                price,
            },
            issues,
        )
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn text_field(
    field: FeatureField,
    value: Option<Value>,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match value {
        None => None,
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            issues.push(FieldIssue::new(field, "must be a string"));
            None
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub label: ProfitLabel,
    pub input: NormalizedInput,
}

impl From<Prediction> for PredictResponse {
    fn from(value: Prediction) -> Self {
        Self {
            label: value.label,
            input: value.input,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VocabularyResponse {
    pub restaurant_id: Vec<String>,
    pub menu_category: Vec<String>,
    pub labels: Vec<ProfitLabel>,
}

impl VocabularyResponse {
    pub fn from_pipeline(p: &InferencePipeline) -> Self {
        let owned = |field| p.vocabulary(field).into_iter().map(str::to_string).collect();
        Self {
            restaurant_id: owned(FeatureField::RestaurantId),
            menu_category: owned(FeatureField::MenuCategory),
            labels: ProfitLabel::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

impl ReadyResponse {
    pub fn ready(p: &InferencePipeline) -> Self {
        Self {
            state: PipelineState::Ready.as_str(),
            classifier: Some(p.classifier_name().to_string()),
            source: Some(p.source().to_string()),
            loaded_at: Some(p.loaded_at()),
        }
    }

    pub fn state_only(state: PipelineState) -> Self {
        Self {
            state: state.as_str(),
            classifier: None,
            source: None,
            loaded_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> PredictRequest {
        PredictRequest::from_body(body).unwrap()
    }

    #[test]
    fn well_typed_body_has_no_issues() {
        let (raw, issues) =
            request(json!({"restaurant_id": "R001", "menu_category": "Desserts", "price": 4}))
                .into_raw();
        assert!(issues.is_empty());
        assert_eq!(raw, RawInput::new("R001", "Desserts", 4.0));
    }

    #[test]
    fn wrong_types_become_field_issues() {
        let (raw, issues) =
            request(json!({"restaurant_id": 3, "menu_category": "Desserts", "price": "15.5"}))
                .into_raw();
        assert_eq!(
            issues,
            vec![
                FieldIssue::new(FeatureField::RestaurantId, "must be a string"),
                FieldIssue::new(FeatureField::Price, "must be a number"),
            ]
        );
        assert!(raw.restaurant_id.is_none());
        assert!(raw.price.is_none());
    }

    #[test]
    fn null_counts_as_absent() {
        let (raw, issues) = request(json!({"price": null})).into_raw();
        assert!(issues.is_empty());
        assert!(raw.price.is_none());
    }

    #[test]
    fn only_objects_are_accepted() {
        let err = PredictRequest::from_body(json!(["R001", "Desserts", 15.5])).unwrap_err();
        assert_eq!(err, "expected a JSON object, got an array");
        assert!(PredictRequest::from_body(json!("R001")).is_err());
        assert!(PredictRequest::from_body(Value::Null).is_err());
    }
}
