//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use futures::StreamExt;
use http::{Request, StatusCode};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tower::ServiceExt;

use parley_api::AppState;
use parley_core::config::AppConfig;
use parley_database::{MemoryMessageStore, MemoryUserDirectory, Stores};
use parley_entity::User;
use parley_realtime::RealtimeEngine;

/// Client side of a test WebSocket.
pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching into the realtime engine
    pub state: AppState,
    /// Seeded user directory (empty when booted from config)
    pub users: Arc<MemoryUserDirectory>,
}

impl TestApp {
    /// Create a new test application with users `u1`, `u2`, `u3`
    pub fn new() -> Self {
        let config = AppConfig::default();

        let users = Arc::new(MemoryUserDirectory::new());
        users.insert(User::new("u1", "Alice", "alice@example.com"));
        users.insert(User::new("u2", "Bob", "bob@example.com"));
        users.insert(User::new("u3", "Carol", "carol@example.com"));

        let stores = Stores {
            messages: Arc::new(MemoryMessageStore::new()),
            users: users.clone(),
            pool: None,
        };
        Self::assemble(config, stores, users)
    }

    /// Boot the way the server binary does: stores from `config.database`,
    /// users provisioned from `config.users`
    pub async fn from_config(config: AppConfig) -> Self {
        let stores = Stores::connect(&config.database)
            .await
            .expect("Failed to connect stores");
        stores
            .seed_users(&config.users)
            .await
            .expect("Failed to seed users");

        Self::assemble(config, stores, Arc::new(MemoryUserDirectory::new()))
    }

    fn assemble(config: AppConfig, stores: Stores, users: Arc<MemoryUserDirectory>) -> Self {
        let realtime = Arc::new(RealtimeEngine::new(&config.realtime));
        let state = AppState::new(config, stores, realtime);
        let router = parley_api::build_router(state.clone());

        Self {
            router,
            state,
            users,
        }
    }

    /// Make an HTTP request to the test app as `caller`
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        caller: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, body_str, caller).await
    }

    /// Make an HTTP request with a raw, possibly malformed, JSON body
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body_str: impl Into<String>,
        caller: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(caller) = caller {
            req = req.header("X-User-Id", caller);
        }

        let req = req
            .body(Body::from(body_str.into()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Serve the app on an ephemeral local port
    pub async fn spawn(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local addr");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Test server failed");
        });
        addr
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Open a WebSocket to the test server, optionally as `user_id`
pub async fn connect(addr: SocketAddr, user_id: Option<&str>) -> WsClient {
    let url = match user_id {
        Some(id) => format!("ws://{addr}/socket?userId={id}"),
        None => format!("ws://{addr}/socket"),
    };
    let (ws, _) = tokio_tungstenite::connect_async(url)
        .await
        .expect("WebSocket connect failed");
    ws
}

/// Next JSON event on the socket, skipping control frames
pub async fn next_event(ws: &mut WsClient) -> Value {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match ws.next().await {
                Some(Ok(WsMessage::Text(text))) => {
                    return serde_json::from_str(text.as_str()).expect("Invalid event JSON");
                }
                Some(Ok(_)) => continue,
                other => panic!("Socket ended unexpectedly: {other:?}"),
            }
        }
    })
    .await
    .expect("Timed out waiting for event")
}

/// Next `getOnlineUsers` payload, sorted
pub async fn next_online_set(ws: &mut WsClient) -> Vec<String> {
    let event = next_event(ws).await;
    assert_eq!(event["event"], "getOnlineUsers", "unexpected event {event}");
    let mut ids: Vec<String> = event["data"]
        .as_array()
        .expect("online set is an array")
        .iter()
        .map(|v| v.as_str().expect("identity is a string").to_string())
        .collect();
    ids.sort();
    ids
}
