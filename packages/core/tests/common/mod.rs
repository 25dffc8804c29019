//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;
use weavenode_core::db::MemoryStore;
use weavenode_core::models::{Node, NodeType};
use weavenode_core::services::{AnchorService, LinkService, NodeService};

/// Install a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn node_service() -> NodeService {
    init_tracing();
    NodeService::new(Arc::new(MemoryStore::new()))
}

pub fn anchor_service() -> AnchorService {
    init_tracing();
    AnchorService::new(Arc::new(MemoryStore::new()))
}

pub fn link_service() -> LinkService {
    init_tracing();
    LinkService::new(Arc::new(MemoryStore::new()))
}

/// Text node with derived title/content, positioned at `path`.
///
/// The last `path` element must be `node_id`, matching the record invariant.
pub fn make_node(node_id: &str, path: &[&str]) -> Node {
    make_node_with(
        node_id,
        path,
        NodeType::Text,
        &format!("node{}", node_id),
        &format!("content{}", node_id),
    )
}

pub fn make_node_with(
    node_id: &str,
    path: &[&str],
    node_type: NodeType,
    title: &str,
    content: &str,
) -> Node {
    let parent_path: Vec<String> = path[..path.len() - 1]
        .iter()
        .map(|s| s.to_string())
        .collect();
    Node::new_with_id(
        node_id.to_string(),
        node_type,
        title.to_string(),
        content.to_string(),
        &parent_path,
    )
}

/// The five-node family used across the mutation suites:
/// roots `1` and `2`; `3` and `4` under `2`; `5` under `2/3`.
pub async fn seed_family(service: &NodeService) {
    for (id, path) in [
        ("1", vec!["1"]),
        ("2", vec!["2"]),
        ("3", vec!["2", "3"]),
        ("4", vec!["2", "4"]),
        ("5", vec!["2", "3", "5"]),
    ] {
        service
            .create_node(make_node(id, &path))
            .await
            .unwrap_or_else(|e| panic!("failed to seed node {}: {}", id, e));
    }
}
