//! Keyword routes — extraction and LSI suggestion.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/keywords/extract", post(extract))
        .route("/keywords/lsi", post(suggest_lsi))
}

#[derive(Debug, Deserialize)]
struct ExtractRequest {
    text: String,
}

async fn extract(Json(req): Json<ExtractRequest>) -> Json<serde_json::Value> {
    let keywords = copyforge_prompt::keywords::extract(&req.text);
    Json(json!({ "keywords": keywords }))
}

#[derive(Debug, Deserialize)]
struct LsiRequest {
    topic: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    max: Option<usize>,
}

/// LSI suggestion never fails: the response carries a `degraded` flag when
/// the offline fallback produced the list.
async fn suggest_lsi(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LsiRequest>,
) -> Json<serde_json::Value> {
    let max = req.max.unwrap_or(copyforge_enhance::DEFAULT_MAX_SUGGESTIONS);
    let result = state.suggester.suggest(&req.topic, &req.keywords, max).await;
    let degraded = result.is_degraded();
    let reason = result.reason().map(str::to_string);

    Json(json!({
        "keywords": result.into_value(),
        "degraded": degraded,
        "reason": reason,
    }))
}
