//! Message repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use parley_core::error::{AppError, ErrorKind};
use parley_core::result::AppResult;
use parley_core::types::{Identity, MessageId};
use parley_entity::{Message, NewMessage};

use crate::store::MessageStore;

/// Repository for message CRUD operations.
#[derive(Debug, Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn save(&self, message: NewMessage) -> AppResult<Message> {
        let message = Message::from_new(message, Utc::now());

        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (id, sender_id, receiver_id, text, image, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(message.id)
        .bind(&message.sender_id)
        .bind(&message.receiver_id)
        .bind(&message.text)
        .bind(&message.image)
        .bind(message.created_at)
        .bind(message.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save message", e))
    }

    async fn find_conversation(&self, a: &Identity, b: &Identity) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT * FROM messages \
             WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1) \
             ORDER BY created_at ASC",
        )
        .bind(a)
        .bind(b)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load conversation", e))
    }

    async fn find_by_id(&self, id: MessageId) -> AppResult<Option<Message>> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find message", e))
    }

    async fn delete(&self, id: MessageId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete message", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
