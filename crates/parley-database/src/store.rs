//! Persistence collaborator interfaces consumed by the message flow.

use async_trait::async_trait;

use parley_core::result::AppResult;
use parley_core::types::{Identity, MessageId};
use parley_entity::{Message, NewMessage, User};

/// Durable storage for chat messages.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// Persist a new message and return the stored record.
    async fn save(&self, message: NewMessage) -> AppResult<Message>;

    /// All messages exchanged between `a` and `b`, oldest first.
    async fn find_conversation(&self, a: &Identity, b: &Identity) -> AppResult<Vec<Message>>;

    /// Look up a single message.
    async fn find_by_id(&self, id: MessageId) -> AppResult<Option<Message>>;

    /// Delete a message. Returns `true` if a row was removed.
    async fn delete(&self, id: MessageId) -> AppResult<bool>;

    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Read access to the set of known users.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Whether a user with this identity exists.
    async fn exists(&self, id: &Identity) -> AppResult<bool>;

    /// Create the user, or refresh the profile of an existing one.
    async fn upsert(&self, user: User) -> AppResult<()>;

    /// Every user except `id`, ordered by name.
    async fn list_except(&self, id: &Identity) -> AppResult<Vec<User>>;
}
