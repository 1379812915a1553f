//! Message fan-out router — pushes persisted messages to online recipients.

use std::sync::Arc;

use tracing::debug;

use parley_core::types::ConnectionId;
use parley_entity::Message;

use crate::connection::registry::ConnectionRegistry;
use crate::message::types::OutboundEvent;
use crate::metrics::RealtimeMetrics;

/// What happened to a routed message.
///
/// None of these are errors; an undelivered message stays available
/// through conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Enqueued on the recipient's connection.
    Delivered {
        /// Connection that received the event.
        connection_id: ConnectionId,
    },
    /// Recipient has no registered connection.
    RecipientOffline,
    /// The recipient's connection was stale or saturated.
    Dropped {
        /// Connection that refused the event.
        connection_id: ConnectionId,
    },
}

impl DeliveryOutcome {
    /// Whether the message reached a live connection.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Routes `newMessage` events to at most one connection: the recipient's.
#[derive(Debug)]
pub struct MessageRouter {
    registry: Arc<ConnectionRegistry>,
    metrics: Arc<RealtimeMetrics>,
}

impl MessageRouter {
    /// Creates a router reading from the given registry.
    pub fn new(registry: Arc<ConnectionRegistry>, metrics: Arc<RealtimeMetrics>) -> Self {
        Self { registry, metrics }
    }

    /// Pushes `message` to its recipient if they are online.
    ///
    /// The registry is consulted at call time, so callers must invoke this
    /// after persistence completes rather than resolving a handle up front.
    /// No retry, no queueing, no acknowledgement.
    pub fn route(&self, message: &Message) -> DeliveryOutcome {
        let Some(handle) = self.registry.lookup(&message.receiver_id) else {
            self.metrics.record_offline();
            debug!(
                message_id = %message.id,
                recipient = %message.receiver_id,
                "Recipient offline, message left for history"
            );
            return DeliveryOutcome::RecipientOffline;
        };

        if handle.send(OutboundEvent::NewMessage(message.clone())) {
            self.metrics.record_delivered();
            debug!(
                message_id = %message.id,
                conn_id = %handle.id,
                "Message pushed to recipient"
            );
            DeliveryOutcome::Delivered {
                connection_id: handle.id,
            }
        } else {
            self.metrics.record_dropped();
            debug!(
                message_id = %message.id,
                conn_id = %handle.id,
                "Recipient connection refused message"
            );
            DeliveryOutcome::Dropped {
                connection_id: handle.id,
            }
        }
    }
}
