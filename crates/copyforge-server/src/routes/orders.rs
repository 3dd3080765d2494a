//! Order routes — intake, lookup, processing, and content history.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use copyforge_core::Order;
use copyforge_store::{ContentStore, OrderStore};

use crate::routes::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/process", post(process_order))
        .route("/orders/{id}/content", get(order_content))
}

#[derive(Debug, Deserialize)]
struct CreateOrderRequest {
    service_type: String,
    details: String,
    #[serde(default)]
    service_options: HashMap<String, String>,
    #[serde(default)]
    additional_requirements: Option<String>,
    contact_name: String,
    contact: String,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    let mut order = Order::new(req.service_type, req.details, req.contact_name, req.contact);
    order.service_options = req.service_options;
    order.additional_requirements = req.additional_requirements;

    match state.store.insert_order(&order) {
        Ok(()) => (StatusCode::CREATED, Json(json!(order))),
        Err(e) => error_response(&e),
    }
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_order(&id) {
        Ok(Some(order)) => (StatusCode::OK, Json(json!(order))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Order not found: {}", id) })),
        ),
        Err(e) => error_response(&e),
    }
}

/// Run the full pipeline for an order. A generation failure is a report,
/// not a transport error: the order stays retryable.
async fn process_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.workflow.process(&id).await {
        Ok(report) => {
            let status = if report.success {
                StatusCode::OK
            } else {
                StatusCode::BAD_GATEWAY
            };
            (status, Json(json!(report)))
        }
        Err(e) => error_response(&e),
    }
}

async fn order_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_order(&id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("Order not found: {}", id) })),
            );
        }
        Err(e) => return error_response(&e),
    }

    match state.store.contents_for_order(&id) {
        Ok(contents) => (StatusCode::OK, Json(json!(contents))),
        Err(e) => error_response(&e),
    }
}
