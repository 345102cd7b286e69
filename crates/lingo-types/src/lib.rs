//! Shared domain types for Lingo.
//!
//! This crate contains the core domain types used across the Lingo tutor
//! backend: users, sessions, chat messages, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod session;
pub mod user;
