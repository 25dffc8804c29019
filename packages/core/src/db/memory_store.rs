//! In-Memory Store
//!
//! A fully in-process implementation of the store traits, used by the test
//! suites and benchmarks. Records live in `BTreeMap`s behind async `RwLock`s,
//! so iteration order is ID-lexicographic and stable between calls.

use crate::db::{AnchorStore, LinkStore, NodeStore};
use crate::models::{Anchor, Link, Node};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory record store backing all three record families.
///
/// # Examples
///
/// ```rust
/// use weavenode_core::db::MemoryStore;
/// use weavenode_core::services::NodeService;
/// use std::sync::Arc;
///
/// let service = NodeService::new(Arc::new(MemoryStore::new()));
/// ```
#[derive(Default)]
pub struct MemoryStore {
    nodes: RwLock<BTreeMap<String, Node>>,
    anchors: RwLock<BTreeMap<String, Anchor>>,
    links: RwLock<BTreeMap<String, Link>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NodeStore for MemoryStore {
    async fn insert_node(&self, node: Node) -> Result<()> {
        let mut nodes = self.nodes.write().await;
        if nodes.contains_key(&node.node_id) {
            bail!("node '{}' already exists", node.node_id);
        }
        nodes.insert(node.node_id.clone(), node);
        Ok(())
    }

    async fn find_node(&self, id: &str) -> Result<Option<Node>> {
        Ok(self.nodes.read().await.get(id).cloned())
    }

    async fn find_nodes(&self, ids: &[String]) -> Result<Vec<Node>> {
        let nodes = self.nodes.read().await;
        Ok(ids.iter().filter_map(|id| nodes.get(id).cloned()).collect())
    }

    async fn find_all_nodes(&self) -> Result<Vec<Node>> {
        Ok(self.nodes.read().await.values().cloned().collect())
    }

    async fn replace_node(&self, node: Node) -> Result<()> {
        let mut nodes = self.nodes.write().await;
        if !nodes.contains_key(&node.node_id) {
            bail!("node '{}' does not exist", node.node_id);
        }
        nodes.insert(node.node_id.clone(), node);
        Ok(())
    }

    async fn delete_nodes(&self, ids: &[String]) -> Result<()> {
        let mut nodes = self.nodes.write().await;
        for id in ids {
            nodes.remove(id);
        }
        Ok(())
    }

    async fn clear_nodes(&self) -> Result<()> {
        self.nodes.write().await.clear();
        Ok(())
    }
}

#[async_trait]
impl AnchorStore for MemoryStore {
    async fn insert_anchor(&self, anchor: Anchor) -> Result<()> {
        let mut anchors = self.anchors.write().await;
        if anchors.contains_key(&anchor.anchor_id) {
            bail!("anchor '{}' already exists", anchor.anchor_id);
        }
        anchors.insert(anchor.anchor_id.clone(), anchor);
        Ok(())
    }

    async fn find_anchor(&self, id: &str) -> Result<Option<Anchor>> {
        Ok(self.anchors.read().await.get(id).cloned())
    }

    async fn find_anchors(&self, ids: &[String]) -> Result<Vec<Anchor>> {
        let anchors = self.anchors.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| anchors.get(id).cloned())
            .collect())
    }

    async fn find_anchors_by_node(&self, node_id: &str) -> Result<Vec<Anchor>> {
        let anchors = self.anchors.read().await;
        Ok(anchors
            .values()
            .filter(|a| a.node_id == node_id)
            .cloned()
            .collect())
    }

    async fn replace_anchor(&self, anchor: Anchor) -> Result<()> {
        let mut anchors = self.anchors.write().await;
        if !anchors.contains_key(&anchor.anchor_id) {
            bail!("anchor '{}' does not exist", anchor.anchor_id);
        }
        anchors.insert(anchor.anchor_id.clone(), anchor);
        Ok(())
    }

    async fn delete_anchors(&self, ids: &[String]) -> Result<()> {
        let mut anchors = self.anchors.write().await;
        for id in ids {
            anchors.remove(id);
        }
        Ok(())
    }

    async fn clear_anchors(&self) -> Result<()> {
        self.anchors.write().await.clear();
        Ok(())
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn insert_link(&self, link: Link) -> Result<()> {
        let mut links = self.links.write().await;
        if links.contains_key(&link.link_id) {
            bail!("link '{}' already exists", link.link_id);
        }
        links.insert(link.link_id.clone(), link);
        Ok(())
    }

    async fn find_link(&self, id: &str) -> Result<Option<Link>> {
        Ok(self.links.read().await.get(id).cloned())
    }

    async fn find_links_by_anchor(&self, anchor_id: &str) -> Result<Vec<Link>> {
        let links = self.links.read().await;
        Ok(links
            .values()
            .filter(|l| l.touches_anchor(anchor_id))
            .cloned()
            .collect())
    }

    async fn delete_links(&self, ids: &[String]) -> Result<()> {
        let mut links = self.links.write().await;
        for id in ids {
            links.remove(id);
        }
        Ok(())
    }

    async fn clear_links(&self) -> Result<()> {
        self.links.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeType;

    fn node(id: &str) -> Node {
        Node::new_with_id(
            id.to_string(),
            NodeType::Text,
            format!("node{}", id),
            format!("content{}", id),
            &[],
        )
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        store.insert_node(node("1")).await.unwrap();
        assert!(store.insert_node(node("1")).await.is_err());
    }

    #[tokio::test]
    async fn replace_requires_existing_record() {
        let store = MemoryStore::new();
        assert!(store.replace_node(node("1")).await.is_err());
        store.insert_node(node("1")).await.unwrap();
        assert!(store.replace_node(node("1")).await.is_ok());
    }

    #[tokio::test]
    async fn find_all_iterates_in_id_order() {
        let store = MemoryStore::new();
        store.insert_node(node("b")).await.unwrap();
        store.insert_node(node("a")).await.unwrap();
        let all = store.find_all_nodes().await.unwrap();
        assert_eq!(all[0].node_id, "a");
        assert_eq!(all[1].node_id, "b");
    }

    #[tokio::test]
    async fn find_nodes_skips_missing_ids() {
        let store = MemoryStore::new();
        store.insert_node(node("1")).await.unwrap();
        let found = store
            .find_nodes(&["1".to_string(), "2".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }
}
