//! Log repository port: persistence for activity logs.

use std::future::Future;

use roster_domain::error::RosterError;
use roster_domain::id::{LogId, UserId};
use roster_domain::log::{Log, NewLog};
use roster_domain::time::Timestamp;

/// Repository for persisting and querying [`Log`]s.
pub trait LogRepository {
    /// Insert a log owned by `user_id`.
    fn create(
        &self,
        user_id: UserId,
        log: NewLog,
        at: Timestamp,
    ) -> impl Future<Output = Result<Log, RosterError>> + Send;

    /// All logs of a user, ordered by id.
    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Log>, RosterError>> + Send;

    /// The `limit` most recent logs of a user, newest `timestamp` first.
    fn find_recent_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Log>, RosterError>> + Send;

    /// Delete a log by id. Returns `false` when `id` is unknown.
    fn delete(&self, id: LogId) -> impl Future<Output = Result<bool, RosterError>> + Send;
}
