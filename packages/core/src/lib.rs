//! WeaveNode Core Engine
//!
//! This crate provides the node hierarchy engine, annotation records, and
//! storage layer for the WeaveNode hypertext system.
//!
//! # Architecture
//!
//! - **Path-encoded hierarchy**: every node carries its ancestor chain and
//!   its direct children's IDs; moves and deletes are list/set operations
//!   validated against those arrays, never pointer rewiring
//! - **Store traits**: persistence is an explicit handle injected into each
//!   service, with embedded libsql ([`db::TursoStore`]) and in-memory
//!   ([`db::MemoryStore`]) backends
//! - **Envelope boundary**: every operation resolves to a
//!   `{ success, payload?, message? }` envelope for the request layer
//!
//! # Modules
//!
//! - [`models`] - Record types (Node, FilePath, Anchor, Link, TreeWrapper)
//! - [`services`] - Hierarchy engine and record CRUD services
//! - [`db`] - Store traits and backends

pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use models::*;
pub use services::*;
