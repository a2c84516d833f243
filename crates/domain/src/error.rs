//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`RosterError`]
//! via `From`, so the HTTP adapter only ever matches on this enum.

use std::error::Error;

/// Top-level error returned by services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// Input failed a domain invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A uniqueness constraint rejected the write.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// The addressed record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Any other persistence failure.
    #[error("{0}")]
    Storage(Box<dyn Error + Send + Sync>),
}

impl RosterError {
    /// Reclassify a rejected payload as a store failure with the same message.
    ///
    /// [`RosterError::NotFound`] and storage errors pass through unchanged.
    #[must_use]
    pub fn into_storage(self) -> Self {
        match self {
            Self::Validation(err) => Self::Storage(Box::new(err)),
            Self::Conflict(err) => Self::Storage(Box::new(err)),
            other => other,
        }
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A timestamp could not be parsed as RFC 3339.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The request body could not be decoded.
    #[error("{0}")]
    MalformedBody(String),
}

/// A write collided with an existing unique value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with this {field} already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub field: &'static str,
}

/// Lookup by id or key found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub key: String,
}
