//! Store Traits - Persistence Abstraction Layer
//!
//! These traits are the only boundary through which the services touch
//! persisted records. They enable multiple backend implementations (the
//! embedded Turso/libsql store, the in-memory store used by tests) without
//! changing service logic, and they keep the store an explicit handle passed
//! into each service rather than a process-wide singleton.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: All methods are async so embedded and networked
//!    backends share one interface
//! 2. **Dumb storage**: Traits expose keyed record operations only. Hierarchy
//!    invariants, cascades and validation live in the services; a store never
//!    interprets a `FilePath`.
//! 3. **Error Handling**: `anyhow::Result` for flexible error context; the
//!    service layer converts to its own error type at the boundary
//! 4. **No cross-write atomicity**: each method is an independent round trip.
//!    Multi-step mutations in the services issue sequential calls with no
//!    transaction spanning them.
//!
//! # Examples
//!
//! ```rust
//! use weavenode_core::db::{MemoryStore, NodeStore};
//! use weavenode_core::models::{Node, NodeType};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store: Arc<dyn NodeStore> = Arc::new(MemoryStore::new());
//!
//!     let node = Node::new(NodeType::Text, "note".to_string(), "hi".to_string(), &[]);
//!     let id = node.node_id.clone();
//!     store.insert_node(node).await?;
//!     assert!(store.find_node(&id).await?.is_some());
//!     Ok(())
//! }
//! ```

use crate::models::{Anchor, Link, Node};
use anyhow::Result;
use async_trait::async_trait;

/// Keyed persistence for node records.
///
/// Implementations must be `Send + Sync`; futures may hop threads.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Insert a new node record. Fails if the ID is already present.
    async fn insert_node(&self, node: Node) -> Result<()>;

    /// Fetch a node by ID. `Ok(None)` when absent (not an error).
    async fn find_node(&self, id: &str) -> Result<Option<Node>>;

    /// Fetch the subset of `ids` that exist, in store iteration order.
    async fn find_nodes(&self, ids: &[String]) -> Result<Vec<Node>>;

    /// Fetch every node record, in store iteration order.
    ///
    /// Iteration order must be stable between calls on an unchanged store;
    /// search tie-breaking leans on it.
    async fn find_all_nodes(&self) -> Result<Vec<Node>>;

    /// Overwrite an existing node record. Fails if the ID is absent.
    async fn replace_node(&self, node: Node) -> Result<()>;

    /// Remove the given node records. Absent IDs are skipped.
    async fn delete_nodes(&self, ids: &[String]) -> Result<()>;

    /// Remove every node record.
    async fn clear_nodes(&self) -> Result<()>;
}

/// Keyed persistence for anchor records.
#[async_trait]
pub trait AnchorStore: Send + Sync {
    /// Insert a new anchor record. Fails if the ID is already present.
    async fn insert_anchor(&self, anchor: Anchor) -> Result<()>;

    /// Fetch an anchor by ID. `Ok(None)` when absent.
    async fn find_anchor(&self, id: &str) -> Result<Option<Anchor>>;

    /// Fetch the subset of `ids` that exist, in store iteration order.
    async fn find_anchors(&self, ids: &[String]) -> Result<Vec<Anchor>>;

    /// Fetch every anchor sitting on the given node.
    async fn find_anchors_by_node(&self, node_id: &str) -> Result<Vec<Anchor>>;

    /// Overwrite an existing anchor record. Fails if the ID is absent.
    async fn replace_anchor(&self, anchor: Anchor) -> Result<()>;

    /// Remove the given anchor records. Absent IDs are skipped.
    async fn delete_anchors(&self, ids: &[String]) -> Result<()>;

    /// Remove every anchor record.
    async fn clear_anchors(&self) -> Result<()>;
}

/// Keyed persistence for link records.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert a new link record. Fails if the ID is already present.
    async fn insert_link(&self, link: Link) -> Result<()>;

    /// Fetch a link by ID. `Ok(None)` when absent.
    async fn find_link(&self, id: &str) -> Result<Option<Link>>;

    /// Fetch every link with the given anchor as either endpoint.
    async fn find_links_by_anchor(&self, anchor_id: &str) -> Result<Vec<Link>>;

    /// Remove the given link records. Absent IDs are skipped.
    async fn delete_links(&self, ids: &[String]) -> Result<()>;

    /// Remove every link record.
    async fn clear_links(&self) -> Result<()>;
}
