//! Prompt assembly for the tutor model.
//!
//! - `template`: role-keyed instructional preambles and fixed prompt lines
//! - `builder`: renders role, history, and the current message into one prompt

pub mod builder;
pub mod template;
