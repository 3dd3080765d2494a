//! Quality scoring route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/quality/score", post(score))
}

#[derive(Debug, Deserialize)]
struct ScoreRequest {
    text: String,
}

async fn score(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScoreRequest>,
) -> Json<serde_json::Value> {
    let metrics = state.scorer.score(&req.text);
    Json(json!(metrics))
}
