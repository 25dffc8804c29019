//! Data Model
//!
//! Record types for the hierarchy engine (`Node`, `FilePath`, `NodeProperty`,
//! `TreeWrapper`) and the annotation layer (`Anchor`, `Link`), plus the
//! operation envelope shared by every service.

pub mod anchor;
pub mod file_path;
pub mod link;
pub mod node;
pub mod property;
pub mod response;
pub mod tree;

pub use anchor::{Anchor, Extent};
pub use file_path::FilePath;
pub use link::Link;
pub use node::{FolderView, Node, NodeType, ValidationError};
pub use property::NodeProperty;
pub use response::ServiceResponse;
pub use tree::TreeWrapper;
