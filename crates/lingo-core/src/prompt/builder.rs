//! Prompt builder for the tutor model.
//!
//! Layout:
//! ```text
//! {preamble}
//! Роль пользователя: {role}.
//!
//! История диалога:
//! {history lines | "История пуста."}
//!
//! Текущее сообщение пользователя: {message}
//!
//! Сформируй полезный ответ, учитывая контекст.
//! ```
//!
//! The output is a pure function of its inputs.

use lingo_types::chat::{ChatMessage, SenderType};

use super::template::{
    AI_SPEAKER, CLOSING_INSTRUCTION, CURRENT_MESSAGE_PREFIX, DEFAULT_ROLE_LABEL,
    EMPTY_HISTORY_MARKER, HISTORY_HEADER, PromptRole, ROLE_LINE_PREFIX, USER_SPEAKER,
};

/// Builds the single text prompt sent to the model.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the prompt for one chat turn.
    ///
    /// `history` is rendered in the order given, one line per message.
    pub fn build(role: Option<&str>, user_message: &str, history: &[ChatMessage]) -> String {
        let preamble = PromptRole::from_role(role).preamble();
        let role_line = Self::role_line(role);
        let history_block = Self::render_history(history);

        format!(
            "{preamble}\n\
            {role_line}\n\n\
            {HISTORY_HEADER}\n\
            {history_block}\n\n\
            {CURRENT_MESSAGE_PREFIX} {user_message}\n\n\
            {CLOSING_INSTRUCTION}"
        )
    }

    fn role_line(role: Option<&str>) -> String {
        let label = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_ROLE_LABEL);
        format!("{ROLE_LINE_PREFIX} {label}.")
    }

    fn render_history(history: &[ChatMessage]) -> String {
        if history.is_empty() {
            return EMPTY_HISTORY_MARKER.to_string();
        }

        history
            .iter()
            .map(|msg| format!("{}: {}", Self::speaker(msg.sender_type), msg.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn speaker(sender: SenderType) -> &'static str {
        match sender {
            SenderType::User => USER_SPEAKER,
            SenderType::Ai => AI_SPEAKER,
        }
    }
}
