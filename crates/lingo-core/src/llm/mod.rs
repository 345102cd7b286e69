//! Language-model abstractions for Lingo.
//!
//! - `ModelClient`: RPITIT trait for concrete backends
//! - `ModelDispatcher`: runs a call on its own task and returns the result
//!   over a channel, optionally bounded by a timeout

pub mod client;
pub mod dispatch;
