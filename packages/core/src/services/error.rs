//! Service Layer Error Types
//!
//! One error enum covers the three services; its variants are the error
//! taxonomy every operation reports through the envelope: validation
//! failures, missing records, conflicts, and store faults. Conversion into
//! [`ServiceResponse`] happens here so the operation boundary stays a single
//! `.into()`.

use crate::models::{ServiceResponse, ValidationError};
use thiserror::Error;

/// Failure of a service operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A referenced record does not exist where existence is required
    #[error("{kind} not found: '{id}'")]
    NotFound { kind: &'static str, id: String },

    /// Malformed record or disallowed field/value; nothing was written
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Duplicate ID on create, or a cyclic/no-op move target
    #[error("conflict: {0}")]
    Conflict(String),

    /// Underlying store fault, surfaced as-is
    #[error("store operation failed: {0}")]
    Store(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "node",
            id: id.into(),
        }
    }

    pub fn anchor_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "anchor",
            id: id.into(),
        }
    }

    pub fn link_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "link",
            id: id.into(),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

impl<T> From<Result<T, ServiceError>> for ServiceResponse<T> {
    fn from(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(payload) => ServiceResponse::ok(payload),
            Err(e) => ServiceResponse::failure(e.to_string()),
        }
    }
}
