use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use menuprofit_inference::{PipelineHandle, PipelineState};

use crate::app::dto;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Readiness: 200 once the pipeline holds loaded artifacts, 503 before.
pub async fn ready(Extension(pipeline): Extension<PipelineHandle>) -> axum::response::Response {
    match pipeline.get() {
        Some(p) => (StatusCode::OK, Json(dto::ReadyResponse::ready(&p))).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(dto::ReadyResponse::state_only(PipelineState::Uninitialized)),
        )
            .into_response(),
    }
}
