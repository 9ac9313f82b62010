use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{json, Map, Value};
use tracing::{error, warn};

use menuprofit_inference::PredictionError;

use crate::context::RequestContext;

/// Map a prediction failure to a status code and a structured body:
/// `{ "error": kind, "message", "field"?, "value"?, "fields"?, "allowed"? }`.
pub fn prediction_error_to_response(
    ctx: &RequestContext,
    err: PredictionError,
) -> axum::response::Response {
    let status = match &err {
        PredictionError::Validation { .. } => StatusCode::BAD_REQUEST,
        PredictionError::UnknownCategory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        PredictionError::Decode { .. } | PredictionError::Model(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        PredictionError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    if err.is_caller_error() {
        warn!(
            request_id = %ctx.request_id(),
            kind = err.kind(),
            error = %err,
            "prediction rejected"
        );
    } else {
        // Artifact inconsistency or an unready process: an operator problem.
        error!(
            request_id = %ctx.request_id(),
            kind = err.kind(),
            error = %err,
            "prediction failed"
        );
    }

    let mut body = Map::new();
    body.insert("error".into(), json!(err.kind()));
    body.insert("message".into(), json!(err.to_string()));
    if let Some(field) = err.field() {
        body.insert("field".into(), json!(field.as_str()));
    }
    if let Some(value) = err.value() {
        body.insert("value".into(), json!(value));
    }
    match &err {
        PredictionError::Validation { issues } => {
            body.insert("fields".into(), json!(issues));
        }
        PredictionError::UnknownCategory { allowed, .. } => {
            body.insert("allowed".into(), json!(allowed));
        }
        _ => {}
    }

    (status, axum::Json(Value::Object(body))).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
