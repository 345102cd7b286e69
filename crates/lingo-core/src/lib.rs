//! Business logic and repository trait definitions for Lingo.
//!
//! This crate defines the "ports" (repository and model-client traits) that
//! the infrastructure layer implements. It depends only on `lingo-types` --
//! never on `lingo-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod prompt;
pub mod repository;
pub mod session;
