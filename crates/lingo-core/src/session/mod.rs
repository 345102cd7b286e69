//! Session token validation.

pub mod validator;
