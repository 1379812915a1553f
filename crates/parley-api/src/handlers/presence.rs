//! Presence handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, OnlineUsersResponse};
use crate::state::AppState;

/// GET /api/presence/online
pub async fn online_users(State(state): State<AppState>) -> Json<ApiResponse<OnlineUsersResponse>> {
    let mut online = state.realtime.online_users();
    online.sort();

    Json(ApiResponse::ok(OnlineUsersResponse {
        count: online.len(),
        online,
    }))
}
