//! Infrastructure layer for Lingo.
//!
//! Contains implementations of the traits defined in `lingo-core`:
//! SQLite storage for users, sessions, and messages, and an HTTP client for
//! OpenAI-compatible model backends. Also loads `config.toml`.

pub mod config;
pub mod llm;
pub mod sqlite;
