//! WebSocket upgrade handler.

use axum::extract::ws::{Message as WsMessage, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, warn};

use parley_core::types::Identity;
use parley_realtime::connection::heartbeat::is_expired;

use crate::state::AppState;

/// Handshake query parameters.
#[derive(Debug, Default, serde::Deserialize)]
pub struct WsQuery {
    /// Identity of the connecting user. Absent or empty means anonymous.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// GET /socket?userId={id} — WebSocket upgrade
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Response {
    let identity = handshake_identity(&query);
    ws.on_upgrade(move |socket| handle_ws_connection(state, identity, socket))
}

/// Identity claimed by the handshake, taken verbatim.
fn handshake_identity(query: &WsQuery) -> Option<Identity> {
    Identity::parse(query.user_id.as_deref())
}

/// Drives one socket from open to close.
async fn handle_ws_connection(state: AppState, identity: Option<Identity>, socket: WebSocket) {
    let engine = state.realtime;
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = engine.lifecycle.open(identity);
    let conn_id = handle.id;
    let heartbeat = engine.heartbeat;
    let mut shutdown = engine.shutdown_receiver();

    // Outbound events, pings, and shutdown.
    let writer_handle = handle.clone();
    let mut writer = tokio::spawn(async move {
        let mut ping = tokio::time::interval(heartbeat.ping_interval);
        ping.tick().await;

        loop {
            tokio::select! {
                event = outbound_rx.recv() => {
                    let Some(event) = event else { break };
                    let frame = match event.to_frame() {
                        Ok(frame) => frame,
                        Err(e) => {
                            warn!(conn_id = %writer_handle.id, error = %e, "Failed to encode event");
                            continue;
                        }
                    };
                    if ws_tx.send(WsMessage::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                _ = ping.tick() => {
                    if is_expired(&writer_handle, &heartbeat) {
                        warn!(
                            conn_id = %writer_handle.id,
                            silent_for = ?writer_handle.since_last_pong(),
                            "Heartbeat timeout"
                        );
                        break;
                    }
                    if ws_tx.send(WsMessage::Ping(Default::default())).await.is_err() {
                        break;
                    }
                }
                _ = shutdown.recv() => {
                    let _ = ws_tx.send(WsMessage::Close(None)).await;
                    break;
                }
            }
        }
    });

    // Inbound frames only matter for liveness.
    let reader_handle = handle.clone();
    let mut reader = tokio::spawn(async move {
        while let Some(result) = ws_rx.next().await {
            match result {
                Ok(WsMessage::Pong(_)) | Ok(WsMessage::Ping(_)) => reader_handle.record_pong(),
                Ok(WsMessage::Close(_)) => break,
                Ok(_) => {
                    debug!(conn_id = %reader_handle.id, "Ignoring inbound frame");
                }
                Err(e) => {
                    debug!(conn_id = %reader_handle.id, error = %e, "WebSocket read error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut writer => reader.abort(),
        _ = &mut reader => writer.abort(),
    }

    engine.lifecycle.close(&handle);
    debug!(conn_id = %conn_id, "WebSocket task finished");
}
