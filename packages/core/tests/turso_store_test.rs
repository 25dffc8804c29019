//! End-to-end runs of the services over the embedded libsql backend.

mod common;

use common::{init_tracing, make_node, seed_family};
use std::sync::Arc;
use tempfile::TempDir;
use weavenode_core::db::TursoStore;
use weavenode_core::models::{Anchor, Link};
use weavenode_core::services::{AnchorService, LinkService, NodeService, ROOT_PARENT};

async fn turso_node_service() -> NodeService {
    init_tracing();
    let store = Arc::new(TursoStore::new_in_memory().await.unwrap());
    NodeService::new(store)
}

#[tokio::test]
async fn node_crud_round_trip() {
    let service = turso_node_service().await;

    let node = make_node("1", &["1"]);
    let created = service.create_node(node.clone()).await.unwrap();
    assert_eq!(created, node);

    let fetched = service.get_node_by_id("1").await.unwrap();
    assert_eq!(fetched, node);

    assert!(service.create_node(make_node("1", &["1"])).await.is_err());
}

#[tokio::test]
async fn hierarchy_mutations_persist() {
    let service = turso_node_service().await;
    seed_family(&service).await;

    let moved = service.move_node("3", "1").await.unwrap();
    assert_eq!(moved.file_path.path, vec!["1".to_string(), "3".to_string()]);

    let tree = service.get_tree_by_root("1").await.unwrap();
    assert_eq!(tree.node_count(), 3);

    service.move_node("3", ROOT_PARENT).await.unwrap();
    assert_eq!(service.get_roots().await.unwrap().len(), 3);

    service.delete_node("3").await.unwrap();
    assert!(service.get_node_by_id("5").await.is_err());
    assert_eq!(service.get_roots().await.unwrap().len(), 2);
}

#[tokio::test]
async fn search_ranks_over_persisted_records() {
    let service = turso_node_service().await;
    service.create_node(make_node("1", &["1"])).await.unwrap();
    service.create_node(make_node("2", &["2"])).await.unwrap();

    // Fixture titles/contents embed their IDs: "content2" matches "content" once
    let results = service.get_nodes_by_search("CONTENT").await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn anchors_and_links_share_the_store() {
    init_tracing();
    let store = Arc::new(TursoStore::new_in_memory().await.unwrap());
    let anchors = AnchorService::new(store.clone());
    let links = LinkService::new(store.clone());

    let anchor1 = Anchor {
        anchor_id: "anchor1".to_string(),
        node_id: "node1".to_string(),
        extent: None,
    };
    let anchor2 = Anchor {
        anchor_id: "anchor2".to_string(),
        node_id: "node1".to_string(),
        extent: None,
    };
    anchors.create_anchor(anchor1).await.unwrap();
    anchors.create_anchor(anchor2).await.unwrap();
    assert_eq!(
        anchors.get_anchors_by_node_id("node1").await.unwrap().len(),
        2
    );

    let link = Link {
        link_id: "link1".to_string(),
        anchor1_id: "anchor1".to_string(),
        anchor2_id: "anchor2".to_string(),
        anchor1_node_id: "node1".to_string(),
        anchor2_node_id: "node1".to_string(),
    };
    links.create_link(link).await.unwrap();
    assert_eq!(
        links.get_links_by_anchor_id("anchor2").await.unwrap().len(),
        1
    );

    anchors.delete_anchor("ghost").await.unwrap();
    links.delete_link("ghost").await.unwrap();
}

#[tokio::test]
async fn reopening_a_database_file_preserves_records() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("weavenode.db");

    {
        let store = Arc::new(TursoStore::new(db_path.clone()).await.unwrap());
        let service = NodeService::new(store);
        service.create_node(make_node("1", &["1"])).await.unwrap();
    }

    let store = Arc::new(TursoStore::new(db_path).await.unwrap());
    let service = NodeService::new(store);
    let node = service.get_node_by_id("1").await.unwrap();
    assert_eq!(node.title, "node1");
}
