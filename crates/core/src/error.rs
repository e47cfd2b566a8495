//! Access error model.

use thiserror::Error;

/// Result type used at the scoping boundary.
pub type AccessResult<T> = Result<T, AccessError>;

/// Access-level error.
///
/// Out-of-scope records are deliberately *not* represented here: a record owned
/// by another identity is reported as absent, exactly like a missing one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No acting identity is bound and the context is not bypassed.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl AccessError {
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}
