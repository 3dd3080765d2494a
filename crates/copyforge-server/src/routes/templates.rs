//! Prompt template routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use copyforge_store::{NewTemplate, TemplateStore};

use crate::routes::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/templates", get(list_templates).put(add_template))
}

async fn list_templates(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_templates() {
        Ok(templates) => (StatusCode::OK, Json(json!(templates))),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
struct AddTemplateRequest {
    name: String,
    service_type: String,
    template: String,
    #[serde(default = "default_version")]
    version: i64,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_version() -> i64 {
    1
}

fn default_active() -> bool {
    true
}

async fn add_template(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddTemplateRequest>,
) -> impl IntoResponse {
    let result = state.store.add_template(NewTemplate {
        name: req.name,
        service_type: req.service_type,
        template: req.template,
        version: req.version,
        active: req.active,
    });

    match result {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))),
        Err(e) => error_response(&e),
    }
}
