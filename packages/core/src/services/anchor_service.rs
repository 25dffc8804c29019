//! Anchor Service - Annotation Record CRUD
//!
//! Anchors are validated records keyed by ID; no hierarchy logic lives here.
//! Unlike node deletion, deleting a missing anchor succeeds.

use crate::db::AnchorStore;
use crate::models::{Anchor, Extent};
use crate::services::error::ServiceError;
use std::sync::Arc;

/// CRUD service for anchor records.
pub struct AnchorService {
    store: Arc<dyn AnchorStore>,
}

impl AnchorService {
    pub fn new(store: Arc<dyn AnchorStore>) -> Self {
        Self { store }
    }

    /// Validate and insert an anchor; a duplicate ID is a conflict.
    pub async fn create_anchor(&self, anchor: Anchor) -> Result<Anchor, ServiceError> {
        anchor.validate()?;

        if self.store.find_anchor(&anchor.anchor_id).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "anchor '{}' already exists",
                anchor.anchor_id
            )));
        }

        self.store.insert_anchor(anchor.clone()).await?;
        tracing::debug!(anchor_id = %anchor.anchor_id, "created anchor");
        Ok(anchor)
    }

    /// Fetch an anchor by ID; a missing record is a failure.
    pub async fn get_anchor_by_id(&self, anchor_id: &str) -> Result<Anchor, ServiceError> {
        self.store
            .find_anchor(anchor_id)
            .await?
            .ok_or_else(|| ServiceError::anchor_not_found(anchor_id))
    }

    /// Fetch the subset of `anchor_ids` that exist.
    pub async fn get_anchors_by_id(
        &self,
        anchor_ids: &[String],
    ) -> Result<Vec<Anchor>, ServiceError> {
        Ok(self.store.find_anchors(anchor_ids).await?)
    }

    /// Every anchor sitting on the given node (possibly empty).
    pub async fn get_anchors_by_node_id(
        &self,
        node_id: &str,
    ) -> Result<Vec<Anchor>, ServiceError> {
        Ok(self.store.find_anchors_by_node(node_id).await?)
    }

    /// Replace an anchor's extent.
    ///
    /// # Errors
    ///
    /// `NotFound` if the anchor is absent; `Validation` if the new extent
    /// fails its checks.
    pub async fn update_extent(
        &self,
        anchor_id: &str,
        extent: Option<Extent>,
    ) -> Result<Anchor, ServiceError> {
        let mut anchor = self.get_anchor_by_id(anchor_id).await?;

        if let Some(extent) = &extent {
            extent.validate()?;
        }

        anchor.extent = extent;
        self.store.replace_anchor(anchor.clone()).await?;
        Ok(anchor)
    }

    /// Remove an anchor. Succeeds whether or not the ID exists.
    pub async fn delete_anchor(&self, anchor_id: &str) -> Result<(), ServiceError> {
        self.store.delete_anchors(&[anchor_id.to_string()]).await?;
        Ok(())
    }

    /// Remove a batch of anchors. Absent IDs are skipped.
    pub async fn delete_anchors(&self, anchor_ids: &[String]) -> Result<(), ServiceError> {
        self.store.delete_anchors(anchor_ids).await?;
        Ok(())
    }

    /// Remove every anchor record. Test/reset utility.
    pub async fn delete_all(&self) -> Result<(), ServiceError> {
        self.store.clear_anchors().await?;
        Ok(())
    }
}
