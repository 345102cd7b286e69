//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `lingo-core` using sqlx with split read/write pools:
//! raw queries, a private Row struct, writes on `writer`, reads on `reader`.

use lingo_core::chat::repository::ChatRepository;
use lingo_types::chat::{ChatMessage, SenderType};
use lingo_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct ChatMessageRow {
    id: String,
    session_id: String,
    user_id: String,
    sender_type: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            user_id: row.try_get("user_id")?,
            sender_type: row.try_get("sender_type")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let sender_type: SenderType = self
            .sender_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatMessage {
            id,
            session_id,
            user_id,
            sender_type,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl ChatRepository for SqliteChatRepository {
    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO messages (id, session_id, user_id, sender_type, content, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(message.session_id.to_string())
        .bind(message.user_id.to_string())
        .bind(message.sender_type.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_chat_history(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        // UUID v7 ids are time-ordered and break ties within one microsecond.
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE session_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row = ChatMessageRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }
}
