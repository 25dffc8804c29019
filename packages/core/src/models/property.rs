//! Field Updates as a Closed Sum Type
//!
//! Multi-field node updates arrive as a list of `NodeProperty` values, one
//! variant per updatable field, each carrying its strongly-typed value. The
//! wire shape is `{ "fieldName": ..., "value": ... }`; an unknown field name
//! or a type-mismatched value fails to deserialize, so no stringly-typed
//! dispatch survives past the boundary.
//!
//! `nodeId` has no variant: the identifier is immutable by construction.
//! `filePath` has a variant so its value can be deep-validated, but the
//! mutation engine rejects it as non-updatable; a node's position changes
//! only through a move.

use crate::models::{FilePath, FolderView, Node, NodeType, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single `(fieldName, value)` change for a node update.
///
/// # Examples
///
/// ```rust
/// use weavenode_core::models::NodeProperty;
///
/// let prop: NodeProperty =
///     serde_json::from_str(r#"{ "fieldName": "title", "value": "renamed" }"#).unwrap();
/// assert_eq!(prop, NodeProperty::Title("renamed".to_string()));
///
/// // Mistyped values never construct a property
/// assert!(serde_json::from_str::<NodeProperty>(
///     r#"{ "fieldName": "content", "value": 1 }"#
/// ).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fieldName", content = "value", rename_all = "camelCase")]
pub enum NodeProperty {
    Title(String),
    Content(String),
    Type(NodeType),
    DateCreated(DateTime<Utc>),
    FilePath(FilePath),
    ViewType(FolderView),
    Longitude(f64),
    Latitude(f64),
    LocationName(String),
    Start(f64),
    ImageWidth(f64),
    ImageHeight(f64),
    OriginalWidth(f64),
    OriginalHeight(f64),
}

impl NodeProperty {
    /// Wire-level field name of this property.
    pub fn field_name(&self) -> &'static str {
        match self {
            NodeProperty::Title(_) => "title",
            NodeProperty::Content(_) => "content",
            NodeProperty::Type(_) => "type",
            NodeProperty::DateCreated(_) => "dateCreated",
            NodeProperty::FilePath(_) => "filePath",
            NodeProperty::ViewType(_) => "viewType",
            NodeProperty::Longitude(_) => "longitude",
            NodeProperty::Latitude(_) => "latitude",
            NodeProperty::LocationName(_) => "locationName",
            NodeProperty::Start(_) => "start",
            NodeProperty::ImageWidth(_) => "imageWidth",
            NodeProperty::ImageHeight(_) => "imageHeight",
            NodeProperty::OriginalWidth(_) => "originalWidth",
            NodeProperty::OriginalHeight(_) => "originalHeight",
        }
    }

    /// Validate the carried value.
    ///
    /// Most variants are fully constrained by their type; `filePath` values
    /// additionally satisfy the full [`FilePath`] structural validation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            NodeProperty::FilePath(fp) => fp.validate(),
            _ => Ok(()),
        }
    }

    /// Apply this change to `node`.
    pub fn apply(self, node: &mut Node) {
        match self {
            NodeProperty::Title(v) => node.title = v,
            NodeProperty::Content(v) => node.content = v,
            NodeProperty::Type(v) => node.node_type = v,
            NodeProperty::DateCreated(v) => node.date_created = Some(v),
            NodeProperty::FilePath(v) => node.file_path = v,
            NodeProperty::ViewType(v) => node.view_type = Some(v),
            NodeProperty::Longitude(v) => node.longitude = Some(v),
            NodeProperty::Latitude(v) => node.latitude = Some(v),
            NodeProperty::LocationName(v) => node.location_name = Some(v),
            NodeProperty::Start(v) => node.start = Some(v),
            NodeProperty::ImageWidth(v) => node.image_width = Some(v),
            NodeProperty::ImageHeight(v) => node.image_height = Some(v),
            NodeProperty::OriginalWidth(v) => node.original_width = Some(v),
            NodeProperty::OriginalHeight(v) => node.original_height = Some(v),
        }
    }
}
