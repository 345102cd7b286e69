//! OpenAI chat-completions wire types.
//!
//! Only the fields Lingo sends or reads are modelled; unknown response
//! fields are ignored.

use serde::{Deserialize, Serialize};

/// Request body for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A single message in the request conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionMessage {
    pub role: String,
    pub content: String,
}

/// Non-streaming response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChoiceMessage {
    /// `null` for refusals and some tool-call replies.
    #[serde(default)]
    pub content: Option<String>,
}
