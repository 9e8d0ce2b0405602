//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::web::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store_provider: &'static str,
    store_reachable: bool,
    timestamp: String,
}

/// `GET /health`: liveness plus a single-attempt store reachability probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_reachable = state.store.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "ok".to_string(),
        store_provider: state.store.provider_name(),
        store_reachable,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
