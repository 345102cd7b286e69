//! Model backend implementations.
//!
//! Contains the concrete implementation of the [`ModelClient`] trait
//! defined in `lingo-core`: an HTTP client for any server speaking the
//! OpenAI chat-completions protocol (OpenAI, Mistral, mistral.rs, vLLM,
//! llama.cpp server, ...).
//!
//! [`ModelClient`]: lingo_core::llm::client::ModelClient

pub mod openai_compat;
