//! HTTP application wiring (Axum router + pipeline injection).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use axum::{middleware as axum_middleware, routing::get, Extension, Router};
use tower::ServiceBuilder;

use menuprofit_inference::PipelineHandle;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The pipeline handle is owned by the caller; handlers only ever borrow the
/// pipeline it holds.
pub fn build_app(pipeline: PipelineHandle) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .route("/ready", get(routes::system::ready))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_context_middleware))
                .layer(Extension(pipeline)),
        )
}
