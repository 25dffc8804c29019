//! Link Service - Connection Record CRUD
//!
//! Links join two anchors; like anchors they are plain validated records.
//! Deleting a missing link succeeds, matching the anchor-side semantics.

use crate::db::LinkStore;
use crate::models::Link;
use crate::services::error::ServiceError;
use std::collections::HashSet;
use std::sync::Arc;

/// CRUD service for link records.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Validate and insert a link; a duplicate ID is a conflict.
    pub async fn create_link(&self, link: Link) -> Result<Link, ServiceError> {
        link.validate()?;

        if self.store.find_link(&link.link_id).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "link '{}' already exists",
                link.link_id
            )));
        }

        self.store.insert_link(link.clone()).await?;
        tracing::debug!(link_id = %link.link_id, "created link");
        Ok(link)
    }

    /// Fetch a link by ID; a missing record is a failure.
    pub async fn get_link_by_id(&self, link_id: &str) -> Result<Link, ServiceError> {
        self.store
            .find_link(link_id)
            .await?
            .ok_or_else(|| ServiceError::link_not_found(link_id))
    }

    /// Every link with the given anchor as either endpoint (possibly empty).
    pub async fn get_links_by_anchor_id(
        &self,
        anchor_id: &str,
    ) -> Result<Vec<Link>, ServiceError> {
        Ok(self.store.find_links_by_anchor(anchor_id).await?)
    }

    /// Every link touching any of the given anchors, deduplicated by link ID.
    pub async fn get_links_by_anchor_ids(
        &self,
        anchor_ids: &[String],
    ) -> Result<Vec<Link>, ServiceError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut links = Vec::new();
        for anchor_id in anchor_ids {
            for link in self.store.find_links_by_anchor(anchor_id).await? {
                if seen.insert(link.link_id.clone()) {
                    links.push(link);
                }
            }
        }
        Ok(links)
    }

    /// Remove a link. Succeeds whether or not the ID exists.
    pub async fn delete_link(&self, link_id: &str) -> Result<(), ServiceError> {
        self.store.delete_links(&[link_id.to_string()]).await?;
        Ok(())
    }

    /// Remove every link record. Test/reset utility.
    pub async fn delete_all(&self) -> Result<(), ServiceError> {
        self.store.clear_links().await?;
        Ok(())
    }
}
