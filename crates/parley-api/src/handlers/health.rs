//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let store = match state.stores.messages.health_check().await {
        Ok(true) => "connected",
        Ok(false) => "degraded",
        Err(e) => {
            tracing::warn!(error = %e, "Message store health check failed");
            "unavailable"
        }
    };
    let status = if store == "connected" { "ok" } else { "degraded" };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: status.to_string(),
        store_backend: state.stores.messages.backend().to_string(),
        store: store.to_string(),
        ws_connections: state.realtime.pool.connection_count(),
        online_users: state.realtime.registry.len(),
        realtime: state.realtime.metrics.snapshot(),
    }))
}
