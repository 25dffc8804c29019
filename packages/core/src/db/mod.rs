//! Database Layer
//!
//! Persistence for the three record families (nodes, anchors, links) behind
//! store traits:
//!
//! - [`NodeStore`] / [`AnchorStore`] / [`LinkStore`] - the abstraction the
//!   services are written against
//! - [`TursoStore`] - embedded Turso/libsql backend (JSON records keyed by ID)
//! - [`MemoryStore`] - in-process backend for tests and benchmarks
//!
//! Stores are dumb keyed collections: every hierarchy invariant is enforced
//! above them, in the services.

mod error;
mod memory_store;
mod store;
mod turso_store;

pub use error::DatabaseError;
pub use memory_store::MemoryStore;
pub use store::{AnchorStore, LinkStore, NodeStore};
pub use turso_store::TursoStore;
