//! Business Services
//!
//! - `NodeService` - hierarchy engine: CRUD, move, cascade delete, tree
//!   reconstruction, ranked search
//! - `AnchorService` / `LinkService` - annotation record CRUD
//!
//! Services coordinate between the store traits and the request layer: they
//! enforce the record invariants, own every multi-step write sequence, and
//! surface all failures as [`ServiceError`] for envelope conversion.

pub mod anchor_service;
pub mod error;
pub mod link_service;
pub mod node_service;

pub use anchor_service::AnchorService;
pub use error::ServiceError;
pub use link_service::LinkService;
pub use node_service::{NodeService, ROOT_PARENT};
