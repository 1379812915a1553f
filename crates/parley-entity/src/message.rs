//! Chat message entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parley_core::types::{Identity, MessageId};

/// A persisted one-to-one chat message.
///
/// Serialized in camelCase; this is the exact payload pushed in a
/// `newMessage` event and returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Author of the message.
    pub sender_id: Identity,
    /// Addressee of the message.
    pub receiver_id: Identity,
    /// Text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// URL of an attached image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// When the message was stored.
    pub created_at: DateTime<Utc>,
    /// When the message was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// Build a freshly stored message from its creation input.
    pub fn from_new(new: NewMessage, now: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            sender_id: new.sender_id,
            receiver_id: new.receiver_id,
            text: new.text,
            image: new.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this message belongs to the conversation between `a` and `b`.
    pub fn is_between(&self, a: &Identity, b: &Identity) -> bool {
        (&self.sender_id == a && &self.receiver_id == b)
            || (&self.sender_id == b && &self.receiver_id == a)
    }
}

/// Data required to store a new message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    /// Author.
    pub sender_id: Identity,
    /// Addressee.
    pub receiver_id: Identity,
    /// Text body.
    pub text: Option<String>,
    /// Image URL.
    pub image: Option<String>,
}
