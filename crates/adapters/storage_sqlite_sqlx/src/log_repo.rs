//! `SQLite` implementation of [`LogRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use roster_app::ports::LogRepository;
use roster_domain::error::RosterError;
use roster_domain::id::{LogId, UserId};
use roster_domain::log::{Log, NewLog};
use roster_domain::time::{self, Timestamp};

use crate::error::{StorageError, decode_timestamp};

struct Wrapper(Log);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let timestamp: String = row.try_get("timestamp")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(Log {
            id: LogId::new(row.try_get("id")?),
            user_id: UserId::new(row.try_get("user_id")?),
            action: row.try_get("action")?,
            timestamp: decode_timestamp(&timestamp)?,
            created_at: decode_timestamp(&created_at)?,
            updated_at: decode_timestamp(&updated_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO logs (user_id, action, timestamp, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?)
    RETURNING *
";
const SELECT_BY_USER: &str = "SELECT * FROM logs WHERE user_id = ? ORDER BY id";
const SELECT_RECENT_BY_USER: &str =
    "SELECT * FROM logs WHERE user_id = ? ORDER BY timestamp DESC, id DESC LIMIT ?";
const DELETE_BY_ID: &str = "DELETE FROM logs WHERE id = ?";

/// `SQLite`-backed log repository.
pub struct SqliteLogRepository {
    pool: SqlitePool,
}

impl SqliteLogRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LogRepository for SqliteLogRepository {
    async fn create(&self, user_id: UserId, log: NewLog, at: Timestamp) -> Result<Log, RosterError> {
        let at = time::to_sortable(&at);
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(user_id.get())
            .bind(&log.action)
            .bind(time::to_sortable(&log.timestamp))
            .bind(&at)
            .bind(&at)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Log>, RosterError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_USER)
            .bind(user_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_recent_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<Log>, RosterError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT_BY_USER)
            .bind(user_id.get())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete(&self, id: LogId) -> Result<bool, RosterError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
