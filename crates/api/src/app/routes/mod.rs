use axum::{
    routing::{get, post},
    Router,
};

pub mod predict;
pub mod system;

/// Router for the prediction endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/predict", post(predict::predict))
        .route("/vocabulary", get(predict::vocabulary))
}
