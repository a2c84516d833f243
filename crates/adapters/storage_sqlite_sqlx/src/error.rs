//! Storage-specific error type wrapping sqlx errors.

use roster_domain::error::{ConflictError, RosterError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for RosterError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Map a write failure, turning a UNIQUE violation into a [`ConflictError`].
pub(crate) fn unique_or_storage(
    err: sqlx::Error,
    entity: &'static str,
    field: &'static str,
) -> RosterError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ConflictError { entity, field }.into()
        }
        _ => StorageError::from(err).into(),
    }
}

/// Decode an RFC 3339 column into a UTC timestamp.
pub(crate) fn decode_timestamp(
    value: &str,
) -> Result<roster_domain::time::Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
