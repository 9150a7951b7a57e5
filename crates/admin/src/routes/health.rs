//! Health check endpoints.

use axum::extract::State;
use axum::http::StatusCode;

use crate::db::ProductStore;
use crate::state::AppState;

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the products table is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let store: &ProductStore = state.catalog().table();
    if store.is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
