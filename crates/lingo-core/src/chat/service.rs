//! Chat service orchestrating one tutor turn and history reads.
//!
//! A turn runs as a single pass:
//! validate -> persist user message -> fetch history -> build prompt ->
//! invoke model -> persist AI message -> respond.
//!
//! The user message is stored before the model is called, so a failed call
//! leaves it in history with no AI reply next to it.

use std::time::Instant;

use tracing::{info, warn};

use lingo_types::chat::{ChatMessage, ChatReply, SenderType};
use lingo_types::error::ChatError;
use lingo_types::user::User;

use crate::chat::repository::ChatRepository;
use crate::llm::client::ModelClient;
use crate::llm::dispatch::ModelDispatcher;
use crate::prompt::builder::PromptBuilder;
use crate::repository::session::SessionRepository;
use crate::session::validator::SessionValidator;

/// Stored and returned instead of an empty model reply.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "Модель вернула пустой ответ.";

/// Orchestrates a chat turn over the repositories and the model dispatcher.
///
/// Generic over the storage and model traits to keep lingo-core free of
/// infrastructure dependencies.
pub struct ChatService<C: ChatRepository, S: SessionRepository, M: ModelClient + 'static> {
    chat_repo: C,
    validator: SessionValidator<S>,
    dispatcher: ModelDispatcher<M>,
}

impl<C, S, M> ChatService<C, S, M>
where
    C: ChatRepository,
    S: SessionRepository,
    M: ModelClient + 'static,
{
    pub fn new(chat_repo: C, validator: SessionValidator<S>, dispatcher: ModelDispatcher<M>) -> Self {
        Self {
            chat_repo,
            validator,
            dispatcher,
        }
    }

    /// Run one chat turn for `user` presenting `token`.
    ///
    /// # Errors
    ///
    /// - `ChatError::Unauthorized` if the session is missing, inactive, or
    ///   expired. Nothing is written.
    /// - `ChatError::Repository` if the user message or history cannot be
    ///   stored or read.
    /// - `ChatError::ModelInvocation` if the model call fails. The user
    ///   message has already been stored at that point.
    pub async fn send_message(
        &self,
        user: &User,
        token: &str,
        content: String,
    ) -> Result<ChatReply, ChatError> {
        let session = self.validator.validate(token, user).await?;

        let user_message = ChatMessage::new(user.id, session.id, SenderType::User, content);
        self.chat_repo.save_message(&user_message).await?;

        // Newest-first from storage; the prompt reads oldest-first.
        let mut history = self.chat_repo.get_chat_history(&session.id).await?;
        history.reverse();

        let prompt = PromptBuilder::build(user.role(), &user_message.content, &history);

        let started = Instant::now();
        let reply = self
            .dispatcher
            .dispatch(prompt)
            .await
            .map_err(ChatError::ModelInvocation)?;

        let reply = if reply.trim().is_empty() {
            warn!(session_id = %session.id, "Model returned an empty reply");
            EMPTY_REPLY_PLACEHOLDER.to_string()
        } else {
            reply
        };

        let ai_message = ChatMessage::new(user.id, session.id, SenderType::Ai, reply);
        if let Err(e) = self.chat_repo.save_message(&ai_message).await {
            // The reply is still returned; it is only missing from history.
            warn!(session_id = %session.id, error = %e, "Failed to persist AI message");
        }

        info!(
            session_id = %session.id,
            user_id = %user.id,
            history_len = history.len(),
            response_ms = started.elapsed().as_millis() as u64,
            "Chat turn completed"
        );

        Ok(ChatReply {
            sender: SenderType::Ai,
            content: ai_message.content,
            timestamp: ai_message.created_at,
        })
    }

    /// Return the session's messages oldest-first.
    pub async fn history(&self, user: &User, token: &str) -> Result<Vec<ChatMessage>, ChatError> {
        let session = self.validator.validate(token, user).await?;

        let mut history = self.chat_repo.get_chat_history(&session.id).await?;
        history.reverse();
        Ok(history)
    }
}
