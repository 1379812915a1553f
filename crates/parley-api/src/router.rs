//! Route definitions for the Parley HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket upgrade lives at the
//! root. The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(message_routes())
        .merge(presence_routes())
        .merge(health_routes());

    let ws_routes = Router::new()
        .route("/socket", get(handlers::ws::ws_upgrade))
        .route("/ws", get(handlers::ws::ws_upgrade));

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Conversation history, send, delete, and sidebar
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages/users", get(handlers::messages::sidebar_users))
        .route("/messages/{id}", get(handlers::messages::conversation))
        .route("/messages/send/{id}", post(handlers::messages::send_message))
        .route(
            "/messages/delete/{id}",
            delete(handlers::messages::delete_message),
        )
}

/// Online set
fn presence_routes() -> Router<AppState> {
    Router::new().route("/presence/online", get(handlers::presence::online_users))
}

/// Health checks
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
