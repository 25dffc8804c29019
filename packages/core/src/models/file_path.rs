//! Ancestor-Path Encoding
//!
//! A node's position in the hierarchy is stored as an explicit ancestor chain
//! (`path`) plus the IDs of its direct children (`children`), instead of a
//! pointer-based tree. Moves and deletes validate and apply as list/set
//! operations on these arrays, keyed by node ID.
//!
//! # Invariants
//!
//! - `path` is never empty; its last element is the owning node's own ID
//! - `path` contains no duplicate ID (in particular, the node's own ID never
//!   appears among its ancestors)
//! - `children` entries are distinct
//!
//! A path of length 1 denotes a root node.

use crate::models::node::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Hierarchy position of a single node: ancestor IDs (self last) and the IDs
/// of its direct children.
///
/// # Examples
///
/// ```rust
/// use weavenode_core::models::FilePath;
///
/// let path = FilePath::new(vec!["root".to_string(), "child".to_string()]);
/// assert_eq!(path.node_id(), Some("child"));
/// assert_eq!(path.parent_id(), Some("root"));
/// assert!(!path.is_root());
/// assert!(path.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePath {
    /// Ordered ancestor chain from a root down to, and including, the owning
    /// node's own ID.
    pub path: Vec<String>,

    /// IDs of direct children. Order reflects insertion order and carries no
    /// semantic meaning.
    pub children: Vec<String>,
}

impl FilePath {
    /// Create a FilePath with no children.
    pub fn new(path: Vec<String>) -> Self {
        Self {
            path,
            children: Vec::new(),
        }
    }

    /// Create a FilePath with an explicit children list.
    pub fn with_children(path: Vec<String>, children: Vec<String>) -> Self {
        Self { path, children }
    }

    /// The owning node's ID (last path element), if the path is non-empty.
    pub fn node_id(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// The immediate parent's ID (second-to-last path element), or `None`
    /// for a root node.
    pub fn parent_id(&self) -> Option<&str> {
        if self.path.len() > 1 {
            Some(self.path[self.path.len() - 2].as_str())
        } else {
            None
        }
    }

    /// A root node is one whose path holds exactly its own ID.
    pub fn is_root(&self) -> bool {
        self.path.len() == 1
    }

    /// Validate the structural invariants.
    ///
    /// Used as a pre-condition gate before any store write: a candidate that
    /// fails here is rejected without being persisted.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyPath`] if `path` is empty
    /// - [`ValidationError::CircularPath`] if the node's own ID also appears
    ///   among its ancestors
    /// - [`ValidationError::DuplicatePathEntry`] if any ID repeats in `path`
    /// - [`ValidationError::DuplicateChild`] if any ID repeats in `children`
    pub fn validate(&self) -> Result<(), ValidationError> {
        let own_id = match self.path.last() {
            Some(id) => id,
            None => return Err(ValidationError::EmptyPath),
        };

        if self.path[..self.path.len() - 1].contains(own_id) {
            return Err(ValidationError::CircularPath { id: own_id.clone() });
        }

        let mut seen = HashSet::new();
        for id in &self.path {
            if !seen.insert(id.as_str()) {
                return Err(ValidationError::DuplicatePathEntry { id: id.clone() });
            }
        }

        let mut seen = HashSet::new();
        for id in &self.children {
            if !seen.insert(id.as_str()) {
                return Err(ValidationError::DuplicateChild { id: id.clone() });
            }
        }

        Ok(())
    }
}
