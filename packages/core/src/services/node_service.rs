//! Node Service - Hierarchy Engine
//!
//! The business-logic layer for the node hierarchy:
//!
//! - Mutations: `create_node`, `update_node`, `move_node`, `delete_node`
//!   (with total subtree cascade)
//! - Tree reconstruction: `get_tree_by_root`, `get_roots`
//! - Ranked search: `get_nodes_by_search`
//! - Keyed reads and the `delete_all` reset utility
//!
//! Every operation performs one or more round trips against the injected
//! [`NodeStore`] and returns a `Result`;
//! [`ServiceResponse`](crate::models::ServiceResponse) conversion turns the
//! outcome into the `{ success, payload?, message? }` envelope at the
//! request boundary.
//!
//! # Consistency Model
//!
//! Multi-step mutations (create's parent update, delete's cascade + parent
//! update, move's dual parent update) issue independent sequential writes.
//! There is no cross-write transaction: a fault between steps surfaces as a
//! failure to the caller but does not undo earlier writes, and concurrent
//! structural mutation of overlapping subtrees is not serialized. Reads
//! tolerate the resulting gaps: a child ID whose record is missing is
//! logged and skipped rather than failing the whole read.
//!
//! After a move, only the moved node's own `path` is rewritten in storage.
//! Descendant positions are derived from `children` pointers during tree
//! reconstruction, not from stored path equality.

use crate::db::NodeStore;
use crate::models::{Node, NodeProperty, TreeWrapper, ValidationError};
use crate::services::error::ServiceError;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Reserved `newParentId` token: move the node to the top level.
pub const ROOT_PARENT: &str = "~";

/// Count non-overlapping, case-insensitive occurrences of `needle_lower`
/// (already lowercased) in `haystack`.
fn occurrences(haystack: &str, needle_lower: &str) -> usize {
    haystack.to_lowercase().matches(needle_lower).count()
}

/// Core service for node CRUD, hierarchy mutation, tree reconstruction and
/// ranked search.
///
/// # Examples
///
/// ```rust
/// use weavenode_core::db::MemoryStore;
/// use weavenode_core::models::{Node, NodeType};
/// use weavenode_core::services::NodeService;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let service = NodeService::new(Arc::new(MemoryStore::new()));
///
///     let node = Node::new(NodeType::Text, "Hello".to_string(), "World".to_string(), &[]);
///     let created = service.create_node(node).await?;
///     let fetched = service.get_node_by_id(&created.node_id).await?;
///     assert_eq!(created, fetched);
///     Ok(())
/// }
/// ```
pub struct NodeService {
    /// Injected record store; the service is the only writer
    store: Arc<dyn NodeStore>,
}

impl NodeService {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Create a fully-formed node record.
    ///
    /// The candidate is validated before anything is written; a duplicate ID
    /// is a conflict. When the node is not a root, its immediate parent
    /// (second-to-last path element) gains the new ID in `children` via a
    /// second, independent write.
    ///
    /// # Errors
    ///
    /// - `Validation` if the record fails structural validation
    /// - `Conflict` if a record with the same `nodeId` exists
    /// - `NotFound` if the parent named by the path does not exist. The child
    ///   insert is NOT rolled back in this case; callers must not assume
    ///   all-or-nothing semantics across the two writes.
    pub async fn create_node(&self, node: Node) -> Result<Node, ServiceError> {
        node.validate()?;

        if self.store.find_node(&node.node_id).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "node '{}' already exists",
                node.node_id
            )));
        }

        self.store.insert_node(node.clone()).await?;

        if let Some(parent_id) = node.parent_id() {
            let mut parent = self
                .store
                .find_node(parent_id)
                .await?
                .ok_or_else(|| ServiceError::node_not_found(parent_id))?;

            if !parent.file_path.children.contains(&node.node_id) {
                parent.file_path.children.push(node.node_id.clone());
                self.store.replace_node(parent).await?;
            }
        }

        tracing::debug!(node_id = %node.node_id, "created node");
        Ok(node)
    }

    /// Fetch a node by ID; a missing record is a failure.
    pub async fn get_node_by_id(&self, node_id: &str) -> Result<Node, ServiceError> {
        self.store
            .find_node(node_id)
            .await?
            .ok_or_else(|| ServiceError::node_not_found(node_id))
    }

    /// Fetch the subset of `node_ids` that exist, in store iteration order.
    pub async fn get_nodes_by_id(&self, node_ids: &[String]) -> Result<Vec<Node>, ServiceError> {
        Ok(self.store.find_nodes(node_ids).await?)
    }

    /// Rank every node by textual relevance to `term`.
    ///
    /// Relevance is the total count of case-insensitive, non-overlapping
    /// occurrences of `term` across `title` and `content`. Zero-occurrence
    /// nodes are excluded; the rest come back in descending score. Ties keep
    /// store iteration order (the sort is stable). Ranking never inspects the
    /// node type.
    ///
    /// # Errors
    ///
    /// `Validation` if `term` is empty or whitespace-only.
    pub async fn get_nodes_by_search(&self, term: &str) -> Result<Vec<Node>, ServiceError> {
        if term.trim().is_empty() {
            return Err(ServiceError::Validation(ValidationError::EmptyField(
                "searchTerm",
            )));
        }

        let needle = term.to_lowercase();
        let mut scored: Vec<(usize, Node)> = Vec::new();
        for node in self.store.find_all_nodes().await? {
            let score = occurrences(&node.title, &needle) + occurrences(&node.content, &needle);
            if score > 0 {
                scored.push((score, node));
            }
        }

        scored.sort_by(|a, b| b.0.cmp(&a.0));

        tracing::debug!(term, matches = scored.len(), "ranked search");
        Ok(scored.into_iter().map(|(_, node)| node).collect())
    }

    /// Apply an ordered list of field changes to a node, all or nothing.
    ///
    /// Every change is validated before any is applied; a single bad entry
    /// leaves the stored record untouched. The whole batch lands in one
    /// store write, so partial application is impossible.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `node_id` does not resolve
    /// - `Validation` if any value fails its field's validation, or the batch
    ///   tries to change `filePath` (positions change only through
    ///   [`NodeService::move_node`])
    pub async fn update_node(
        &self,
        node_id: &str,
        properties: Vec<NodeProperty>,
    ) -> Result<Node, ServiceError> {
        let mut node = self.get_node_by_id(node_id).await?;

        for property in &properties {
            property.validate()?;
            if matches!(property, NodeProperty::FilePath(_)) {
                return Err(ServiceError::Validation(ValidationError::ImmutableField(
                    "filePath",
                )));
            }
        }

        for property in properties {
            property.apply(&mut node);
        }

        // Gate before the write, same as create
        node.validate()?;

        self.store.replace_node(node.clone()).await?;
        tracing::debug!(node_id, "updated node");
        Ok(node)
    }

    /// Re-parent a node.
    ///
    /// `new_parent_id` is either an existing node's ID or [`ROOT_PARENT`]
    /// (`"~"`) to make the node a root. The moved node's `path` becomes
    /// `[new parent's path..., nodeId]`; its `children` are untouched, and
    /// descendants' stored paths are NOT rewritten; tree reconstruction
    /// follows `children` pointers below the moved node.
    ///
    /// # Errors
    ///
    /// All precondition failures abort with no mutation:
    ///
    /// - `NotFound` if the node or the (non-sentinel) target parent is absent
    /// - `Conflict` if the target is the node itself, one of its descendants,
    ///   or its current parent (redundant moves are failures, not successes)
    pub async fn move_node(
        &self,
        node_id: &str,
        new_parent_id: &str,
    ) -> Result<Node, ServiceError> {
        let mut node = self.get_node_by_id(node_id).await?;

        if new_parent_id == node_id {
            return Err(ServiceError::conflict(format!(
                "node '{}' cannot become its own parent",
                node_id
            )));
        }

        let new_parent = if new_parent_id == ROOT_PARENT {
            None
        } else {
            Some(self.get_node_by_id(new_parent_id).await?)
        };

        if new_parent.is_some() {
            let descendants = self.collect_descendants(&node).await?;
            if descendants.iter().any(|id| id == new_parent_id) {
                return Err(ServiceError::conflict(format!(
                    "node '{}' is a descendant of '{}'",
                    new_parent_id, node_id
                )));
            }
        }

        let old_parent_id = node.parent_id().map(str::to_string);
        let target_parent_id = new_parent.as_ref().map(|p| p.node_id.clone());
        if old_parent_id == target_parent_id {
            return Err(ServiceError::conflict(format!(
                "node '{}' is already under the requested parent",
                node_id
            )));
        }

        let mut new_path = match &new_parent {
            Some(parent) => parent.file_path.path.clone(),
            None => Vec::new(),
        };
        new_path.push(node.node_id.clone());
        node.file_path.path = new_path;

        self.store.replace_node(node.clone()).await?;

        if let Some(old_parent_id) = old_parent_id {
            match self.store.find_node(&old_parent_id).await? {
                Some(mut old_parent) => {
                    old_parent.file_path.children.retain(|c| c != node_id);
                    self.store.replace_node(old_parent).await?;
                }
                None => {
                    tracing::warn!(
                        node_id,
                        parent_id = %old_parent_id,
                        "old parent record missing during move"
                    );
                }
            }
        }

        if let Some(mut parent) = new_parent {
            if !parent.file_path.children.contains(&node.node_id) {
                parent.file_path.children.push(node.node_id.clone());
                self.store.replace_node(parent).await?;
            }
        }

        tracing::debug!(node_id, new_parent_id, "moved node");
        Ok(node)
    }

    /// Delete a node and its entire descendant subtree.
    ///
    /// Descendants are everything reachable through `children` references;
    /// siblings and the parent's other children are unaffected. When the
    /// target has a parent, the parent's `children` drops the target's ID in
    /// a final independent write.
    ///
    /// # Errors
    ///
    /// `NotFound` if `node_id` does not resolve. (Anchor and link deletion
    /// elsewhere succeed on missing IDs; node deletion deliberately does
    /// not.)
    pub async fn delete_node(&self, node_id: &str) -> Result<(), ServiceError> {
        let node = self.get_node_by_id(node_id).await?;

        let mut doomed = self.collect_descendants(&node).await?;
        doomed.push(node.node_id.clone());
        self.store.delete_nodes(&doomed).await?;

        if let Some(parent_id) = node.parent_id() {
            match self.store.find_node(parent_id).await? {
                Some(mut parent) => {
                    parent.file_path.children.retain(|c| c != node_id);
                    self.store.replace_node(parent).await?;
                }
                None => {
                    tracing::warn!(node_id, parent_id, "parent record missing during delete");
                }
            }
        }

        tracing::debug!(node_id, removed = doomed.len(), "deleted subtree");
        Ok(())
    }

    /// Reconstruct the full subtree rooted at `node_id` as a
    /// [`TreeWrapper`] snapshot.
    ///
    /// Children expand depth-first in `children` order. The snapshot reflects
    /// the store as of this call; concurrent writers are not blocked, so no
    /// cross-record consistency is guaranteed.
    pub async fn get_tree_by_root(&self, node_id: &str) -> Result<TreeWrapper, ServiceError> {
        let node = self.get_node_by_id(node_id).await?;
        self.expand(node).await
    }

    /// Reconstruct every top-level tree.
    ///
    /// Scans all stored nodes, selects those whose path has length 1, and
    /// expands each exactly as [`NodeService::get_tree_by_root`] would.
    pub async fn get_roots(&self) -> Result<Vec<TreeWrapper>, ServiceError> {
        let mut roots = Vec::new();
        for node in self.store.find_all_nodes().await? {
            if node.is_root() {
                roots.push(self.expand(node).await?);
            }
        }
        Ok(roots)
    }

    /// Remove every node record. Test/reset utility.
    pub async fn delete_all(&self) -> Result<(), ServiceError> {
        self.store.clear_nodes().await?;
        Ok(())
    }

    /// Collect the IDs of every descendant reachable through `children`
    /// references. Traversal order is not observable to callers.
    ///
    /// Tolerates store inconsistencies: a listed child with no record is
    /// logged and skipped, and already-visited IDs are not followed twice.
    async fn collect_descendants(&self, node: &Node) -> Result<Vec<String>, ServiceError> {
        let mut collected = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(node.node_id.clone());

        let mut frontier: Vec<String> = node.file_path.children.clone();
        while let Some(id) = frontier.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            match self.store.find_node(&id).await? {
                Some(child) => {
                    frontier.extend(child.file_path.children.iter().cloned());
                    collected.push(id);
                }
                None => {
                    tracing::warn!(node_id = %id, "child listed but record missing; skipping");
                }
            }
        }

        Ok(collected)
    }

    /// Recursively resolve `children` into child wrappers, depth-first.
    fn expand<'a>(
        &'a self,
        node: Node,
    ) -> Pin<Box<dyn Future<Output = Result<TreeWrapper, ServiceError>> + Send + 'a>> {
        Box::pin(async move {
            let child_ids = node.file_path.children.clone();
            let mut wrapper = TreeWrapper::new(node);

            for child_id in child_ids {
                match self.store.find_node(&child_id).await? {
                    Some(child) => {
                        let subtree = self.expand(child).await?;
                        wrapper.add_child(subtree);
                    }
                    None => {
                        tracing::warn!(
                            node_id = %child_id,
                            "child listed but record missing; omitting from tree"
                        );
                    }
                }
            }

            Ok(wrapper)
        })
    }
}
