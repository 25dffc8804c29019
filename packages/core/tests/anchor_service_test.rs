//! Anchor record CRUD.

mod common;

use common::anchor_service;
use weavenode_core::models::{Anchor, Extent};
use weavenode_core::services::ServiceError;

fn text_extent(start: i64, end: i64) -> Extent {
    Extent::Text {
        start_character: start,
        end_character: end,
        text: "text".to_string(),
    }
}

fn make_anchor(anchor_id: &str, node_id: &str, extent: Option<Extent>) -> Anchor {
    Anchor {
        anchor_id: anchor_id.to_string(),
        node_id: node_id.to_string(),
        extent,
    }
}

#[tokio::test]
async fn creates_valid_anchor() {
    let service = anchor_service();

    let anchor = make_anchor("anchor1", "node1", Some(text_extent(1, 3)));
    let created = service.create_anchor(anchor.clone()).await.unwrap();
    assert_eq!(created, anchor);

    let fetched = service.get_anchor_by_id("anchor1").await.unwrap();
    assert_eq!(fetched, anchor);
}

#[tokio::test]
async fn rejects_malformed_anchor() {
    let service = anchor_service();

    // Empty IDs
    assert!(service
        .create_anchor(make_anchor("", "node1", None))
        .await
        .is_err());
    assert!(service
        .create_anchor(make_anchor("anchor1", "", None))
        .await
        .is_err());

    // Inverted extent
    let result = service
        .create_anchor(make_anchor("anchor1", "node1", Some(text_extent(5, 3))))
        .await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn rejects_duplicate_anchor_id() {
    let service = anchor_service();
    service
        .create_anchor(make_anchor("anchor1", "node1", None))
        .await
        .unwrap();

    let result = service
        .create_anchor(make_anchor("anchor1", "node2", None))
        .await;
    assert!(matches!(result, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn get_fails_for_missing_anchor() {
    let service = anchor_service();
    assert!(matches!(
        service.get_anchor_by_id("ghost").await,
        Err(ServiceError::NotFound { .. })
    ));
}

#[tokio::test]
async fn gets_found_subset_by_ids() {
    let service = anchor_service();
    for id in ["anchor1", "anchor2"] {
        service
            .create_anchor(make_anchor(id, "node1", None))
            .await
            .unwrap();
    }

    let anchors = service
        .get_anchors_by_id(&[
            "anchor1".to_string(),
            "anchor2".to_string(),
            "missing".to_string(),
        ])
        .await
        .unwrap();
    assert_eq!(anchors.len(), 2);
}

#[tokio::test]
async fn gets_anchors_by_node_id() {
    let service = anchor_service();
    service
        .create_anchor(make_anchor("anchor1", "node1", None))
        .await
        .unwrap();
    service
        .create_anchor(make_anchor("anchor2", "node1", Some(text_extent(0, 2))))
        .await
        .unwrap();
    service
        .create_anchor(make_anchor("anchor3", "node2", None))
        .await
        .unwrap();

    let anchors = service.get_anchors_by_node_id("node1").await.unwrap();
    assert_eq!(anchors.len(), 2);

    let none = service.get_anchors_by_node_id("node3").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn updates_extent() {
    let service = anchor_service();
    service
        .create_anchor(make_anchor("anchor1", "node1", Some(text_extent(1, 3))))
        .await
        .unwrap();

    let updated = service
        .update_extent("anchor1", Some(text_extent(2, 8)))
        .await
        .unwrap();
    assert_eq!(updated.extent, Some(text_extent(2, 8)));

    // Clearing the extent makes it a whole-node anchor
    let cleared = service.update_extent("anchor1", None).await.unwrap();
    assert_eq!(cleared.extent, None);
    let fetched = service.get_anchor_by_id("anchor1").await.unwrap();
    assert_eq!(fetched.extent, None);
}

#[tokio::test]
async fn update_extent_failures_leave_record_untouched() {
    let service = anchor_service();
    let original = service
        .create_anchor(make_anchor("anchor1", "node1", Some(text_extent(1, 3))))
        .await
        .unwrap();

    assert!(matches!(
        service.update_extent("ghost", None).await,
        Err(ServiceError::NotFound { .. })
    ));
    assert!(matches!(
        service.update_extent("anchor1", Some(text_extent(9, 2))).await,
        Err(ServiceError::Validation(_))
    ));

    let stored = service.get_anchor_by_id("anchor1").await.unwrap();
    assert_eq!(stored, original);
}

#[tokio::test]
async fn delete_succeeds_for_missing_id() {
    // Unlike node deletion, deleting an unknown anchor is a success
    let service = anchor_service();
    assert!(service.delete_anchor("ghost").await.is_ok());
}

#[tokio::test]
async fn deletes_single_and_batch() {
    let service = anchor_service();
    for id in ["anchor1", "anchor2", "anchor3"] {
        service
            .create_anchor(make_anchor(id, "node1", None))
            .await
            .unwrap();
    }

    service.delete_anchor("anchor1").await.unwrap();
    assert!(service.get_anchor_by_id("anchor1").await.is_err());

    service
        .delete_anchors(&["anchor2".to_string(), "anchor3".to_string()])
        .await
        .unwrap();
    assert!(service.get_anchors_by_node_id("node1").await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_all_clears_the_collection() {
    let service = anchor_service();
    service
        .create_anchor(make_anchor("anchor1", "node1", None))
        .await
        .unwrap();

    service.delete_all().await.unwrap();
    assert!(service.get_anchor_by_id("anchor1").await.is_err());
}
