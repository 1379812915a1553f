//! In-memory message store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use parley_core::result::AppResult;
use parley_core::types::{Identity, MessageId};
use parley_entity::{Message, NewMessage};

use crate::store::MessageStore;

/// Messages kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    messages: RwLock<Vec<Message>>,
}

impl MemoryMessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages.
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn save(&self, message: NewMessage) -> AppResult<Message> {
        let message = Message::from_new(message, Utc::now());
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn find_conversation(&self, a: &Identity, b: &Identity) -> AppResult<Vec<Message>> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.is_between(a, b))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: MessageId) -> AppResult<Option<Message>> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn delete(&self, id: MessageId) -> AppResult<bool> {
        let mut messages = self.messages.write().await;
        let before = messages.len();
        messages.retain(|m| m.id != id);
        Ok(messages.len() < before)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
