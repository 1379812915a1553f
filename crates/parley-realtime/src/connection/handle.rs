//! Individual WebSocket connection handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU8, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::warn;

use parley_core::types::{ConnectionId, Identity};

use crate::message::types::OutboundEvent;

/// Lifecycle state of a single transport session.
///
/// Transitions only move forward: `Connecting → Open → Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    /// Transport accepted, handshake not yet processed.
    Connecting = 0,
    /// Handshake processed; eligible for presence and delivery.
    Open = 1,
    /// Terminal. The handle is never reused.
    Closed = 2,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Connecting,
            1 => Self::Open,
            _ => Self::Closed,
        }
    }
}

/// A handle to a single WebSocket connection.
///
/// Holds the sender channel for pushing events to the client plus the
/// identity captured at handshake time.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Identity supplied in the handshake, if any
    pub identity: Option<Identity>,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<OutboundEvent>,
    state: AtomicU8,
    /// Last pong, as unix milliseconds
    last_pong_ms: AtomicI64,
}

impl ConnectionHandle {
    /// Create a new handle in the `Connecting` state.
    pub fn new(identity: Option<Identity>, sender: mpsc::Sender<OutboundEvent>) -> Self {
        let now = Utc::now();
        Self {
            id: ConnectionId::new(),
            identity,
            connected_at: now,
            sender,
            state: AtomicU8::new(ConnectionState::Connecting as u8),
            last_pong_ms: AtomicI64::new(now.timestamp_millis()),
        }
    }

    /// Create a handle together with the receiving end of its outbound buffer.
    pub fn channel(
        identity: Option<Identity>,
        buffer: usize,
    ) -> (Arc<Self>, mpsc::Receiver<OutboundEvent>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Arc::new(Self::new(identity, tx)), rx)
    }

    /// Push an event to this connection without waiting.
    ///
    /// Returns `false` if the event was not enqueued: the handle is closed,
    /// the buffer is full, or the socket task has gone away.
    pub fn send(&self, event: OutboundEvent) -> bool {
        if self.state() == ConnectionState::Closed {
            return false;
        }
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!(
                    conn_id = %self.id,
                    event = event.name(),
                    "Connection send buffer full, dropping event"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.state
                    .store(ConnectionState::Closed as u8, Ordering::SeqCst);
                false
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Whether the connection is open.
    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// `Connecting → Open`. Returns `false` from any other state.
    pub fn mark_open(&self) -> bool {
        self.state
            .compare_exchange(
                ConnectionState::Connecting as u8,
                ConnectionState::Open as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }

    /// Move to `Closed`. Returns `true` only for the call that performed
    /// the transition.
    pub fn mark_closed(&self) -> bool {
        self.state.swap(ConnectionState::Closed as u8, Ordering::SeqCst)
            != ConnectionState::Closed as u8
    }

    /// Record a pong response
    pub fn record_pong(&self) {
        self.last_pong_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// Time elapsed since the last pong (or since connect).
    pub fn since_last_pong(&self) -> Duration {
        let elapsed = Utc::now().timestamp_millis() - self.last_pong_ms.load(Ordering::Relaxed);
        Duration::from_millis(elapsed.max(0) as u64)
    }

    #[cfg(test)]
    pub(crate) fn set_last_pong(&self, at: DateTime<Utc>) {
        self.last_pong_ms
            .store(at.timestamp_millis(), Ordering::Relaxed);
    }
}
