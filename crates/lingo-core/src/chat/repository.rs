//! ChatRepository trait definition.
//!
//! Append and read access to the message history of a session.
//! Follows the same RPITIT pattern as the other repositories.

use lingo_types::chat::ChatMessage;
use lingo_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat message persistence.
///
/// Implementations live in lingo-infra (e.g., `SqliteChatRepository`).
pub trait ChatRepository: Send + Sync {
    /// Durably append a message to its session.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get every message of a session, newest first.
    fn get_chat_history(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}
