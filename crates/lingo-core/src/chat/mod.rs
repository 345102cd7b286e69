//! Chat persistence abstraction and the per-request chat orchestrator.

pub mod repository;
pub mod service;
