//! Log service: use-cases for a user's activity log.
//!
//! Owners are resolved by email regardless of their archived flag, so an
//! archived user keeps recording and exposing activity.

use roster_domain::error::{NotFoundError, RosterError};
use roster_domain::id::LogId;
use roster_domain::log::{Log, LogDraft};
use roster_domain::time;
use roster_domain::user::User;

use crate::ports::{ArchiveScope, LogRepository, UserRepository};

/// Number of entries returned by [`LogService::recent_logs`].
pub const RECENT_LOG_LIMIT: usize = 5;

/// Application service for activity logs.
pub struct LogService<UR, LR> {
    users: UR,
    logs: LR,
}

impl<UR, LR> LogService<UR, LR>
where
    UR: UserRepository,
    LR: LogRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(users: UR, logs: LR) -> Self {
        Self { users, logs }
    }

    async fn owner(&self, email: &str) -> Result<User, RosterError> {
        self.users
            .find_by_email(email, ArchiveScope::Any)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "User",
                    key: email.to_string(),
                }
                .into()
            })
    }

    /// Record a new log for the user identified by `email`.
    ///
    /// The owner is resolved before `draft` is parsed; a draft that fails
    /// to parse or validate is reported as [`RosterError::Storage`].
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when no user has `email`, or
    /// [`RosterError::Storage`] when the draft is refused or the write fails.
    #[tracing::instrument(skip(self, draft), fields(action = ?draft.action))]
    pub async fn record(&self, email: &str, draft: LogDraft) -> Result<Log, RosterError> {
        let owner = self.owner(email).await?;
        let log = draft.into_new_log().map_err(RosterError::into_storage)?;
        self.logs.create(owner.id, log, time::now()).await
    }

    /// All logs of the user identified by `email`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when no user has `email`, or a
    /// storage error.
    pub async fn logs_for(&self, email: &str) -> Result<Vec<Log>, RosterError> {
        let owner = self.owner(email).await?;
        self.logs.find_by_user(owner.id).await
    }

    /// The [`RECENT_LOG_LIMIT`] newest logs of the user identified by `email`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when no user has `email`, or a
    /// storage error.
    pub async fn recent_logs(&self, email: &str) -> Result<Vec<Log>, RosterError> {
        let owner = self.owner(email).await?;
        self.logs
            .find_recent_by_user(owner.id, RECENT_LOG_LIMIT)
            .await
    }

    /// Delete a single log entry.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when `id` is unknown, or a storage
    /// error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_log(&self, id: LogId) -> Result<(), RosterError> {
        if self.logs.delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError {
                entity: "Log",
                key: id.to_string(),
            }
            .into())
        }
    }
}
