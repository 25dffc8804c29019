//! Link Records
//!
//! A link connects two anchors (and records the nodes each anchor sits on).
//! Like anchors, links are plain validated records with no referential
//! cascade back into the hierarchy.

use crate::models::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bidirectional connection between two anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub link_id: String,
    pub anchor1_id: String,
    pub anchor2_id: String,
    pub anchor1_node_id: String,
    pub anchor2_node_id: String,
}

impl Link {
    /// Create a link between two anchors with a generated ID.
    pub fn new(
        anchor1_id: String,
        anchor2_id: String,
        anchor1_node_id: String,
        anchor2_node_id: String,
    ) -> Self {
        Self {
            link_id: format!("link.{}", Uuid::new_v4()),
            anchor1_id,
            anchor2_id,
            anchor1_node_id,
            anchor2_node_id,
        }
    }

    /// Whether either endpoint is the given anchor.
    pub fn touches_anchor(&self, anchor_id: &str) -> bool {
        self.anchor1_id == anchor_id || self.anchor2_id == anchor_id
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.link_id.is_empty() {
            return Err(ValidationError::EmptyField("linkId"));
        }
        if self.anchor1_id.is_empty() {
            return Err(ValidationError::EmptyField("anchor1Id"));
        }
        if self.anchor2_id.is_empty() {
            return Err(ValidationError::EmptyField("anchor2Id"));
        }
        if self.anchor1_node_id.is_empty() {
            return Err(ValidationError::EmptyField("anchor1NodeId"));
        }
        if self.anchor2_node_id.is_empty() {
            return Err(ValidationError::EmptyField("anchor2NodeId"));
        }
        if self.anchor1_id == self.anchor2_id {
            return Err(ValidationError::InvalidLink(format!(
                "both endpoints reference anchor '{}'",
                self.anchor1_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(a1: &str, a2: &str) -> Link {
        Link::new(
            a1.to_string(),
            a2.to_string(),
            "node1".to_string(),
            "node2".to_string(),
        )
    }

    #[test]
    fn valid_link() {
        let l = link("anchor1", "anchor2");
        assert!(l.validate().is_ok());
        assert!(l.link_id.starts_with("link."));
        assert!(l.touches_anchor("anchor1"));
        assert!(l.touches_anchor("anchor2"));
        assert!(!l.touches_anchor("anchor3"));
    }

    #[test]
    fn rejects_empty_endpoint() {
        let l = link("", "anchor2");
        assert!(matches!(
            l.validate(),
            Err(ValidationError::EmptyField("anchor1Id"))
        ));
    }

    #[test]
    fn rejects_self_link() {
        let l = link("anchor1", "anchor1");
        assert!(matches!(l.validate(), Err(ValidationError::InvalidLink(_))));
    }

    #[test]
    fn serializes_camel_case_endpoints() {
        let l = link("a1", "a2");
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["anchor1Id"], "a1");
        assert_eq!(json["anchor2NodeId"], "node2");
    }
}
