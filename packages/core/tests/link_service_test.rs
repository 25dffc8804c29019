//! Link record CRUD.

mod common;

use common::link_service;
use weavenode_core::models::Link;
use weavenode_core::services::ServiceError;

fn make_link(link_id: &str, anchor1: &str, anchor2: &str) -> Link {
    Link {
        link_id: link_id.to_string(),
        anchor1_id: anchor1.to_string(),
        anchor2_id: anchor2.to_string(),
        anchor1_node_id: "node1".to_string(),
        anchor2_node_id: "node2".to_string(),
    }
}

#[tokio::test]
async fn creates_valid_link() {
    let service = link_service();

    let link = make_link("link1", "anchor1", "anchor2");
    let created = service.create_link(link.clone()).await.unwrap();
    assert_eq!(created, link);

    let fetched = service.get_link_by_id("link1").await.unwrap();
    assert_eq!(fetched, link);
}

#[tokio::test]
async fn rejects_malformed_link() {
    let service = link_service();

    assert!(matches!(
        service.create_link(make_link("link1", "", "anchor2")).await,
        Err(ServiceError::Validation(_))
    ));
    assert!(matches!(
        service
            .create_link(make_link("link1", "anchor1", "anchor1"))
            .await,
        Err(ServiceError::Validation(_))
    ));
}

#[tokio::test]
async fn rejects_duplicate_link_id() {
    let service = link_service();
    service
        .create_link(make_link("link1", "anchor1", "anchor2"))
        .await
        .unwrap();

    let result = service
        .create_link(make_link("link1", "anchor3", "anchor4"))
        .await;
    assert!(matches!(result, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn get_fails_for_missing_link() {
    let service = link_service();
    assert!(matches!(
        service.get_link_by_id("ghost").await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn gets_links_by_anchor_id() {
    let service = link_service();
    service
        .create_link(make_link("link1", "anchor1", "anchor2"))
        .await
        .unwrap();
    service
        .create_link(make_link("link2", "anchor2", "anchor1"))
        .await
        .unwrap();
    service
        .create_link(make_link("link3", "anchor3", "anchor2"))
        .await
        .unwrap();
    service
        .create_link(make_link("link4", "anchor3", "anchor1"))
        .await
        .unwrap();

    let links = service.get_links_by_anchor_id("anchor2").await.unwrap();
    assert_eq!(links.len(), 3);
    for id in ["link1", "link2", "link3"] {
        assert!(links.iter().any(|l| l.link_id == id));
    }
}

#[tokio::test]
async fn unknown_anchor_yields_empty_success() {
    let service = link_service();
    service
        .create_link(make_link("link1", "anchor1", "anchor2"))
        .await
        .unwrap();

    let links = service.get_links_by_anchor_id("anchor3").await.unwrap();
    assert!(links.is_empty());
}

#[tokio::test]
async fn batch_lookup_deduplicates() {
    let service = link_service();
    service
        .create_link(make_link("link1", "anchor1", "anchor2"))
        .await
        .unwrap();
    service
        .create_link(make_link("link2", "anchor2", "anchor3"))
        .await
        .unwrap();

    // link1 touches both requested anchors but must appear once
    let links = service
        .get_links_by_anchor_ids(&["anchor1".to_string(), "anchor2".to_string()])
        .await
        .unwrap();
    assert_eq!(links.len(), 2);
}

#[tokio::test]
async fn delete_succeeds_for_missing_id() {
    let service = link_service();
    assert!(service.delete_link("ghost").await.is_ok());
}

#[tokio::test]
async fn deletes_link() {
    let service = link_service();
    service
        .create_link(make_link("link1", "anchor1", "anchor2"))
        .await
        .unwrap();

    service.delete_link("link1").await.unwrap();
    assert!(service.get_link_by_id("link1").await.is_err());
}

#[tokio::test]
async fn delete_all_clears_the_collection() {
    let service = link_service();
    service
        .create_link(make_link("link1", "anchor1", "anchor2"))
        .await
        .unwrap();

    service.delete_all().await.unwrap();
    assert!(service.get_link_by_id("link1").await.is_err());
}
