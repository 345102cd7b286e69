//! ModelClient trait definition.

use lingo_types::error::LlmError;

/// A remote language model that turns one prompt into one reply.
///
/// The call is opaque: a single prompt string in, the generated text out.
/// Implementations live in lingo-infra (e.g., `OpenAiCompatClient`).
pub trait ModelClient: Send + Sync {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// Send the prompt and wait for the complete reply.
    fn send_prompt(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
