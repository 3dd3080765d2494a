//! HTTP route handlers for the order-to-content API.

pub mod keywords;
pub mod orders;
pub mod quality;
pub mod templates;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use copyforge_core::Error;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(orders::routes())
        .merge(quality::routes())
        .merge(keywords::routes())
        .merge(templates::routes())
}

/// Map a domain error to an HTTP response.
pub(crate) fn error_response(err: &Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        Error::OrderNotFound(_) => StatusCode::NOT_FOUND,
        Error::GenerationTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        Error::Generation { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}
