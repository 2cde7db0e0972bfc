use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status and the size of the loaded dataset.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let shows = state.shows.read().await.len();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "setbook",
        "shows": shows
    }))
}
