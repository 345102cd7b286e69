//! HTTP/REST API layer for Lingo.
//!
//! Axum-based API with session-token authentication, an error envelope,
//! and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
