//! Tree reconstruction output type.

use crate::models::Node;
use serde::{Deserialize, Serialize};

/// A transient, fully materialized node-plus-children snapshot.
///
/// Built bottom-up from store reads by the tree builder; never persisted.
/// The wrapper owns its node and its (ordered) child wrappers, so the caller
/// can hold the snapshot independently of later store mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeWrapper {
    pub node: Node,
    pub children: Vec<TreeWrapper>,
}

impl TreeWrapper {
    pub fn new(node: Node) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: TreeWrapper) {
        self.children.push(child);
    }

    /// Total number of nodes in this snapshot, the wrapped node included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeWrapper::node_count)
            .sum::<usize>()
    }
}
