//! Uniform operation envelope.
//!
//! Every operation in the external operation set resolves to a
//! `ServiceResponse`: failures are data, not panics, so a request layer can
//! serialize the outcome without inspecting error internals.

use serde::{Deserialize, Serialize};

/// `{ success, payload?, message? }` envelope returned to the request layer.
///
/// # Examples
///
/// ```rust
/// use weavenode_core::models::ServiceResponse;
///
/// let ok = ServiceResponse::ok(42);
/// assert!(ok.success);
/// assert_eq!(ok.payload, Some(42));
///
/// let failed: ServiceResponse<i32> = ServiceResponse::failure("no such node");
/// assert!(!failed.success);
/// assert_eq!(failed.message.as_deref(), Some("no such node"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ServiceResponse<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            message: Some(message.into()),
        }
    }
}
