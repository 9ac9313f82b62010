use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use serde_json::Value;

use menuprofit_core::{FieldIssue, RawInput};
use menuprofit_inference::{PipelineHandle, PredictionError};

use crate::app::{dto, errors};
use crate::context::RequestContext;

pub async fn predict(
    Extension(pipeline): Extension<PipelineHandle>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let body = match body {
        Ok(Json(v)) => dto::PredictRequest::from_body(v),
        Err(e) => Err(e.body_text()),
    };
    let body = match body {
        Ok(b) => b,
        Err(message) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_json", message);
        }
    };

    let (raw, type_issues) = body.into_raw();
    if !type_issues.is_empty() {
        let err = PredictionError::Validation {
            issues: with_remaining_issues(&raw, type_issues),
        };
        return errors::prediction_error_to_response(&ctx, err);
    }

    match pipeline.predict(&raw) {
        Ok(prediction) => {
            (StatusCode::OK, Json(dto::PredictResponse::from(prediction))).into_response()
        }
        Err(e) => errors::prediction_error_to_response(&ctx, e),
    }
}

/// Type problems plus whatever else is wrong with the well-typed fields, in
/// column order.
fn with_remaining_issues(raw: &RawInput, mut issues: Vec<FieldIssue>) -> Vec<FieldIssue> {
    let mistyped: Vec<_> = issues.iter().map(|i| i.field).collect();
    if let Err(rest) = raw.normalize() {
        issues.extend(rest.into_iter().filter(|r| !mistyped.contains(&r.field)));
    }
    issues.sort_by_key(|i| i.field);
    issues
}

/// The valid set for each categorical field, so a caller can offer choices
/// instead of free text.
pub async fn vocabulary(
    Extension(pipeline): Extension<PipelineHandle>,
) -> axum::response::Response {
    match pipeline.get() {
        Some(p) => {
            (StatusCode::OK, Json(dto::VocabularyResponse::from_pipeline(&p))).into_response()
        }
        None => errors::json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "not_ready",
            "inference pipeline is not initialized",
        ),
    }
}
