use std::time::Instant;

use axum::{
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::info;
use uuid::Uuid;

use crate::context::RequestContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attach a [`RequestContext`] to every request and log its outcome.
///
/// A well-formed incoming `x-request-id` is kept so callers can correlate;
/// otherwise a new id is generated. The id is echoed on the response.
pub async fn request_context_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = incoming_request_id(req.headers())
        .map(RequestContext::new)
        .unwrap_or_else(RequestContext::generate);

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ctx);

    let started = Instant::now();
    let mut res = next.run(req).await;

    info!(
        request_id = %ctx.request_id(),
        method = %method,
        path = %path,
        status = res.status().as_u16(),
        elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        "request completed"
    );

    if let Ok(v) = HeaderValue::from_str(&ctx.request_id().to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, v);
    }
    res
}

fn incoming_request_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(REQUEST_ID_HEADER)?
        .to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}
