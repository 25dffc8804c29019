//! Node Data Structures
//!
//! This module defines the `Node` struct (the content entity of the
//! hierarchy) together with the `NodeType` enumeration and the validation
//! errors shared by the model layer.
//!
//! # Architecture
//!
//! - **One record per node**: a node owns exactly one [`FilePath`] encoding
//!   its ancestry and direct children
//! - **ID-keyed**: `node_id` is unique and immutable for the lifetime of the
//!   record; `file_path.path` always terminates in it
//! - **Type-specific metadata**: geolocation, media dimensions and playback
//!   offsets ride along as optional fields, opaque to the hierarchy engine
//!
//! # Examples
//!
//! ```rust
//! use weavenode_core::models::{Node, NodeType};
//!
//! // A root text node with a generated, type-prefixed ID
//! let root = Node::new(NodeType::Text, "My note".to_string(), "hello".to_string(), &[]);
//! assert!(root.is_root());
//! assert!(root.validate().is_ok());
//!
//! // A child under the root
//! let child = Node::new(
//!     NodeType::Image,
//!     "Diagram".to_string(),
//!     "https://example.com/d.png".to_string(),
//!     &root.file_path.path,
//! );
//! assert_eq!(child.parent_id(), Some(root.node_id.as_str()));
//! ```

use crate::models::FilePath;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for model-layer records
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("file path is empty")]
    EmptyPath,

    #[error("node '{id}' appears among its own ancestors")]
    CircularPath { id: String },

    #[error("duplicate ID '{id}' in file path")]
    DuplicatePathEntry { id: String },

    #[error("duplicate child ID '{id}'")]
    DuplicateChild { id: String },

    #[error("file path terminates in '{terminal}' but the node ID is '{node_id}'")]
    PathMismatch { node_id: String, terminal: String },

    #[error("required field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("field '{0}' cannot be changed through a field update")]
    ImmutableField(&'static str),

    #[error("invalid extent: {0}")]
    InvalidExtent(String),

    #[error("invalid link: {0}")]
    InvalidLink(String),
}

/// Content type of a node.
///
/// The hierarchy engine never branches on this; it exists for record
/// validation and for consumers rendering the node's `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Text,
    Image,
    Video,
    Audio,
    Pdf,
    Folder,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Text => "text",
            NodeType::Image => "image",
            NodeType::Video => "video",
            NodeType::Audio => "audio",
            NodeType::Pdf => "pdf",
            NodeType::Folder => "folder",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation mode for folder nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderView {
    List,
    Grid,
}

/// A content unit in the hierarchy.
///
/// # Fields
///
/// - `node_id`: unique, immutable identifier (generated IDs carry the type as
///   a prefix, e.g. `text.550e8400-…`)
/// - `title` / `content`: user-facing text; the semantics of `content` depend
///   on `node_type` (raw text, a media URL, …)
/// - `file_path`: owned hierarchy position; its `path` always terminates in
///   `node_id`
/// - `date_created`: set by the constructors, preserved verbatim on reads
/// - remaining fields: optional type-specific metadata, opaque to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Node {
    /// Unique identifier; never changes after creation
    pub node_id: String,

    /// User-assigned title
    pub title: String,

    /// Content type
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Payload; interpretation depends on `node_type`
    pub content: String,

    /// Hierarchy position (ancestor chain + direct children)
    pub file_path: FilePath,

    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,

    /// Folder presentation mode (folder nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_type: Option<FolderView>,

    /// Geolocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,

    /// Playback start offset in seconds (video/audio nodes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,

    /// Rendered media dimensions (image nodes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<f64>,

    /// Source media dimensions (image nodes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_height: Option<f64>,
}

impl Node {
    /// Generate a fresh node ID carrying the type as a prefix.
    pub fn generate_id(node_type: NodeType) -> String {
        format!("{}.{}", node_type, Uuid::new_v4())
    }

    /// Create a node under `parent_path` with a generated ID.
    ///
    /// Pass an empty `parent_path` to create a root node.
    pub fn new(
        node_type: NodeType,
        title: String,
        content: String,
        parent_path: &[String],
    ) -> Self {
        let node_id = Self::generate_id(node_type);
        Self::new_with_id(node_id, node_type, title, content, parent_path)
    }

    /// Create a node with a caller-chosen ID under `parent_path`.
    pub fn new_with_id(
        node_id: String,
        node_type: NodeType,
        title: String,
        content: String,
        parent_path: &[String],
    ) -> Self {
        let mut path = parent_path.to_vec();
        path.push(node_id.clone());

        Self {
            node_id,
            title,
            node_type,
            content,
            file_path: FilePath::new(path),
            date_created: Some(Utc::now()),
            view_type: None,
            longitude: None,
            latitude: None,
            location_name: None,
            start: None,
            image_width: None,
            image_height: None,
            original_width: None,
            original_height: None,
        }
    }

    /// Validate the structural invariants of this record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the node ID is empty, the owned
    /// [`FilePath`] fails its own validation, or the path does not terminate
    /// in this node's ID.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.node_id.is_empty() {
            return Err(ValidationError::EmptyField("nodeId"));
        }

        self.file_path.validate()?;

        match self.file_path.node_id() {
            Some(terminal) if terminal == self.node_id => Ok(()),
            terminal => Err(ValidationError::PathMismatch {
                node_id: self.node_id.clone(),
                terminal: terminal.unwrap_or_default().to_string(),
            }),
        }
    }

    /// Whether this node is a root (its path holds exactly its own ID).
    pub fn is_root(&self) -> bool {
        self.file_path.is_root()
    }

    /// The immediate parent's ID, or `None` for a root node.
    pub fn parent_id(&self) -> Option<&str> {
        self.file_path.parent_id()
    }
}
