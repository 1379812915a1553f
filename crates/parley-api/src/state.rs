//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use parley_core::config::AppConfig;
use parley_database::Stores;
use parley_realtime::RealtimeEngine;
use parley_service::MessageService;

/// Shared application state passed to every handler via Axum's `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Persistence backends.
    pub stores: Stores,
    /// Real-time engine.
    pub realtime: Arc<RealtimeEngine>,
    /// Message use cases.
    pub message_service: Arc<MessageService>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Wires the services on top of the given stores and engine.
    pub fn new(config: AppConfig, stores: Stores, realtime: Arc<RealtimeEngine>) -> Self {
        let message_service = Arc::new(MessageService::new(
            Arc::clone(&stores.messages),
            Arc::clone(&stores.users),
            Arc::clone(&realtime.router),
        ));

        Self {
            config: Arc::new(config),
            stores,
            realtime,
            message_service,
            started_at: Instant::now(),
        }
    }
}
