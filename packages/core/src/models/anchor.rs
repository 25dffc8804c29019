//! Anchor Records
//!
//! An anchor marks a sub-region of a node: a character range in a text
//! node, a rectangle on an image, a rectangle plus start offset on a video.
//! Anchors are simple validated records: they reference a node by ID but
//! carry no hierarchy invariants of their own.

use crate::models::{NodeType, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The sub-region of a node an anchor covers.
///
/// Serialized with a `type` tag mirroring the node types it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Extent {
    /// Character range in a text node
    #[serde(rename_all = "camelCase")]
    Text {
        start_character: i64,
        end_character: i64,
        text: String,
    },

    /// Rectangle on an image node
    #[serde(rename_all = "camelCase")]
    Image {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },

    /// Rectangle plus playback offset on a video node
    #[serde(rename_all = "camelCase")]
    Video {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        start: f64,
    },
}

impl Extent {
    /// The node type this extent's tag corresponds to.
    pub fn node_type(&self) -> NodeType {
        match self {
            Extent::Text { .. } => NodeType::Text,
            Extent::Image { .. } => NodeType::Image,
            Extent::Video { .. } => NodeType::Video,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Extent::Text {
            start_character,
            end_character,
            ..
        } = self
        {
            if *start_character < 0 {
                return Err(ValidationError::InvalidExtent(format!(
                    "startCharacter {} is negative",
                    start_character
                )));
            }
            if start_character > end_character {
                return Err(ValidationError::InvalidExtent(format!(
                    "startCharacter {} exceeds endCharacter {}",
                    start_character, end_character
                )));
            }
        }
        Ok(())
    }
}

/// An annotation marker on a node.
///
/// `extent` is `None` for whole-node anchors (e.g. on pdf or folder nodes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    pub anchor_id: String,
    pub node_id: String,
    pub extent: Option<Extent>,
}

impl Anchor {
    /// Create an anchor on `node_id` with a generated ID.
    pub fn new(node_id: String, extent: Option<Extent>) -> Self {
        Self {
            anchor_id: format!("anchor.{}", Uuid::new_v4()),
            node_id,
            extent,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.anchor_id.is_empty() {
            return Err(ValidationError::EmptyField("anchorId"));
        }
        if self.node_id.is_empty() {
            return Err(ValidationError::EmptyField("nodeId"));
        }
        if let Some(extent) = &self.extent {
            extent.validate()?;
        }
        Ok(())
    }
}
