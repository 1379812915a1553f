//! Message service — persist first, then push to the recipient if online.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use parley_core::error::AppError;
use parley_core::types::{Identity, MessageId};
use parley_database::{MessageStore, UserDirectory};
use parley_entity::{Message, NewMessage, User};
use parley_realtime::MessageRouter;

use crate::context::RequestContext;

/// Longest accepted text body, in characters.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Content of a message to send.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessage {
    /// Text body.
    pub text: Option<String>,
    /// Image URL.
    pub image: Option<String>,
}

impl SendMessage {
    fn validate(&self) -> Result<(), AppError> {
        let has_text = self.text.as_deref().is_some_and(|t| !t.trim().is_empty());
        let has_image = self.image.as_deref().is_some_and(|i| !i.trim().is_empty());
        if !has_text && !has_image {
            return Err(AppError::validation("Message must have text or an image"));
        }
        if let Some(text) = &self.text {
            if text.chars().count() > MAX_TEXT_CHARS {
                return Err(AppError::validation(format!(
                    "Message text exceeds {MAX_TEXT_CHARS} characters"
                )));
            }
        }
        Ok(())
    }
}

/// Chat message use cases.
#[derive(Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    users: Arc<dyn UserDirectory>,
    router: Arc<MessageRouter>,
}

impl std::fmt::Debug for MessageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageService")
            .field("backend", &self.messages.backend())
            .finish()
    }
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(
        messages: Arc<dyn MessageStore>,
        users: Arc<dyn UserDirectory>,
        router: Arc<MessageRouter>,
    ) -> Self {
        Self {
            messages,
            users,
            router,
        }
    }

    /// Stores a message from the caller to `receiver` and pushes it to the
    /// receiver's live connection, if any.
    ///
    /// The stored message is returned whether or not the push happened.
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        receiver: Identity,
        input: SendMessage,
    ) -> Result<Message, AppError> {
        input.validate()?;

        if !self.users.exists(&receiver).await? {
            return Err(AppError::not_found(format!("User {receiver} not found")));
        }

        let message = self
            .messages
            .save(NewMessage {
                sender_id: ctx.caller.clone(),
                receiver_id: receiver,
                text: input.text,
                image: input.image,
            })
            .await?;

        let outcome = self.router.route(&message);

        info!(
            message_id = %message.id,
            sender = %message.sender_id,
            receiver = %message.receiver_id,
            delivered = outcome.is_delivered(),
            "Message sent"
        );

        Ok(message)
    }

    /// Every message between the caller and `other`, oldest first.
    pub async fn conversation(
        &self,
        ctx: &RequestContext,
        other: &Identity,
    ) -> Result<Vec<Message>, AppError> {
        let messages = self.messages.find_conversation(&ctx.caller, other).await?;
        debug!(caller = %ctx.caller, other = %other, count = messages.len(), "Loaded conversation");
        Ok(messages)
    }

    /// Deletes one of the caller's own messages.
    pub async fn delete_message(
        &self,
        ctx: &RequestContext,
        id: MessageId,
    ) -> Result<(), AppError> {
        let message = self
            .messages
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Message {id} not found")))?;

        if message.sender_id != ctx.caller {
            return Err(AppError::authorization(
                "Only the sender can delete a message",
            ));
        }

        if !self.messages.delete(id).await? {
            return Err(AppError::not_found(format!("Message {id} not found")));
        }

        info!(message_id = %id, caller = %ctx.caller, "Message deleted");
        Ok(())
    }

    /// Every user except the caller.
    pub async fn sidebar_users(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        self.users.list_except(&ctx.caller).await
    }
}

#[cfg(test)]
mod tests {
    use parley_core::config::RealtimeConfig;
    use parley_core::error::ErrorKind;
    use parley_database::{MemoryMessageStore, MemoryUserDirectory};
    use parley_realtime::{OutboundEvent, RealtimeEngine};

    use super::*;

    struct Fixture {
        service: MessageService,
        engine: RealtimeEngine,
        store: Arc<MemoryMessageStore>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserDirectory::new());
        users.insert(User::new("u1", "Alice", "alice@example.com"));
        users.insert(User::new("u2", "Bob", "bob@example.com"));
        users.insert(User::new("u3", "Carol", "carol@example.com"));
        let store = Arc::new(MemoryMessageStore::new());
        let engine = RealtimeEngine::new(&RealtimeConfig::default());
        let service = MessageService::new(store.clone(), users, engine.router.clone());
        Fixture {
            service,
            engine,
            store,
        }
    }

    fn text(body: &str) -> SendMessage {
        SendMessage {
            text: Some(body.to_string()),
            image: None,
        }
    }

    fn ctx(caller: &str) -> RequestContext {
        RequestContext::new(caller.into())
    }

    #[tokio::test]
    async fn test_send_to_online_recipient_pushes_saved_message() {
        let f = fixture();
        let (_h1, mut rx1) = f.engine.lifecycle.open(Some("u1".into()));
        while rx1.try_recv().is_ok() {}

        let saved = f
            .service
            .send_message(&ctx("u2"), "u1".into(), text("hi"))
            .await
            .unwrap();

        assert_eq!(rx1.recv().await, Some(OutboundEvent::NewMessage(saved)));
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_send_to_offline_recipient_still_persists() {
        let f = fixture();
        let (_h1, mut rx1) = f.engine.lifecycle.open(Some("u1".into()));
        while rx1.try_recv().is_ok() {}

        let saved = f
            .service
            .send_message(&ctx("u2"), "u3".into(), text("hi"))
            .await
            .unwrap();

        assert_eq!(saved.receiver_id.as_str(), "u3");
        assert!(rx1.try_recv().is_err());

        let history = f.service.conversation(&ctx("u3"), &"u2".into()).await.unwrap();
        assert_eq!(history, vec![saved]);
    }

    #[tokio::test]
    async fn test_send_rejects_empty_and_oversized_content() {
        let f = fixture();

        let err = f
            .service
            .send_message(&ctx("u2"), "u1".into(), text("   "))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let long = "x".repeat(MAX_TEXT_CHARS + 1);
        let err = f
            .service
            .send_message(&ctx("u2"), "u1".into(), text(&long))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let image_only = SendMessage {
            text: None,
            image: Some("https://img.example/cat.png".to_string()),
        };
        assert!(
            f.service
                .send_message(&ctx("u2"), "u1".into(), image_only)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_send_to_unknown_user_is_not_found() {
        let f = fixture();
        let err = f
            .service
            .send_message(&ctx("u2"), "ghost".into(), text("hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(f.store.len().await, 0);
    }

    #[tokio::test]
    async fn test_only_sender_can_delete() {
        let f = fixture();
        let saved = f
            .service
            .send_message(&ctx("u2"), "u1".into(), text("hi"))
            .await
            .unwrap();

        let err = f.service.delete_message(&ctx("u1"), saved.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        f.service.delete_message(&ctx("u2"), saved.id).await.unwrap();

        let err = f.service.delete_message(&ctx("u2"), saved.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_sidebar_excludes_caller() {
        let f = fixture();
        let users = f.service.sidebar_users(&ctx("u1")).await.unwrap();
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u2", "u3"]);
    }
}
