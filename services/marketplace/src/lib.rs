//! Marketplace service layer for CarDex
//!
//! Sits between callers (HTTP handlers, CLI, tests) and storage:
//! - `repository`: async repository traits plus the open-trade filter model
//! - `memory`: a concurrent in-memory store implementing every repository
//! - `services`: trade, pack, collection and user services orchestrating the
//!   pure `trading-engine` core and applying state transitions
//!
//! All persistence is behind injected repository trait objects; swapping the
//! in-memory store for a relational backend touches nothing above it.

pub mod error;
pub mod memory;
pub mod repository;
pub mod services;

pub use error::ServiceError;
pub use memory::MemoryStore;
