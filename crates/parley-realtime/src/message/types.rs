//! Outbound WebSocket event definitions.
//!
//! Every text frame the server sends is a JSON object of the form
//! `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

use parley_core::types::Identity;
use parley_entity::Message;

/// Events sent by the server to connected clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundEvent {
    /// The full set of identities currently online.
    #[serde(rename = "getOnlineUsers")]
    OnlineUsers(Vec<Identity>),
    /// A message addressed to the receiving connection's user.
    #[serde(rename = "newMessage")]
    NewMessage(Message),
}

impl OutboundEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OnlineUsers(_) => "getOnlineUsers",
            Self::NewMessage(_) => "newMessage",
        }
    }

    /// Serialize to the JSON text frame sent on the socket.
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
