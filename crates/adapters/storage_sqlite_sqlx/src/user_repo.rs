//! `SQLite` implementation of [`UserRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use roster_app::ports::{ArchiveScope, SearchField, UserRepository};
use roster_domain::error::RosterError;
use roster_domain::id::UserId;
use roster_domain::time::{self, Timestamp};
use roster_domain::user::{User, UserProfile};

use crate::error::{StorageError, decode_timestamp, unique_or_storage};

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }

    fn many(rows: Vec<Self>) -> Vec<User> {
        rows.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(User {
            id: UserId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: row.try_get("role")?,
            archived: row.try_get("archived")?,
            created_at: decode_timestamp(&created_at)?,
            updated_at: decode_timestamp(&updated_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO users (name, email, role, archived, created_at, updated_at)
    VALUES (?, ?, ?, 0, ?, ?)
    RETURNING *
";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_BY_EMAIL: &str = "SELECT * FROM users WHERE email = ?";
const SELECT_ACTIVE_BY_EMAIL: &str = "SELECT * FROM users WHERE email = ? AND archived = 0";
const SELECT_ARCHIVED_BY_EMAIL: &str = "SELECT * FROM users WHERE email = ? AND archived = 1";
const SELECT_ALL: &str = "SELECT * FROM users ORDER BY id";
const SELECT_ACTIVE: &str = "SELECT * FROM users WHERE archived = 0 ORDER BY id";
const SELECT_ARCHIVED: &str = "SELECT * FROM users WHERE archived = 1 ORDER BY id";
const SELECT_BY_ROLE: &str = "SELECT * FROM users WHERE role = ? ORDER BY id";
const SEARCH_NAME: &str = r"SELECT * FROM users WHERE name LIKE ? ESCAPE '\' ORDER BY id";
const SEARCH_EMAIL: &str = r"SELECT * FROM users WHERE email LIKE ? ESCAPE '\' ORDER BY id";
const UPDATE: &str = r"
    UPDATE users SET name = ?, email = ?, role = ?, updated_at = ?
    WHERE id = ?
    RETURNING *
";
const ARCHIVE: &str = "UPDATE users SET archived = 1, updated_at = ? WHERE id = ? RETURNING *";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";

/// Build a `LIKE` pattern matching `fragment` literally anywhere in the column.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, profile: UserProfile, at: Timestamp) -> Result<User, RosterError> {
        let at = time::to_sortable(&at);
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(&profile.role)
            .bind(&at)
            .bind(&at)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| unique_or_storage(err, "User", "email"))?;

        Ok(row.0)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RosterError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_by_email(
        &self,
        email: &str,
        scope: ArchiveScope,
    ) -> Result<Option<User>, RosterError> {
        let query = match scope {
            ArchiveScope::Active => SELECT_ACTIVE_BY_EMAIL,
            ArchiveScope::Archived => SELECT_ARCHIVED_BY_EMAIL,
            ArchiveScope::Any => SELECT_BY_EMAIL,
        };
        let row: Option<Wrapper> = sqlx::query_as(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn list(&self, scope: ArchiveScope) -> Result<Vec<User>, RosterError> {
        let query = match scope {
            ArchiveScope::Active => SELECT_ACTIVE,
            ArchiveScope::Archived => SELECT_ARCHIVED,
            ArchiveScope::Any => SELECT_ALL,
        };
        let rows: Vec<Wrapper> = sqlx::query_as(query)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::many(rows))
    }

    async fn find_by_role(&self, role: &str) -> Result<Vec<User>, RosterError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_ROLE)
            .bind(role)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::many(rows))
    }

    async fn search(&self, field: SearchField, fragment: &str) -> Result<Vec<User>, RosterError> {
        let query = match field {
            SearchField::Name => SEARCH_NAME,
            SearchField::Email => SEARCH_EMAIL,
        };
        let rows: Vec<Wrapper> = sqlx::query_as(query)
            .bind(contains_pattern(fragment))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::many(rows))
    }

    async fn update(
        &self,
        id: UserId,
        profile: UserProfile,
        at: Timestamp,
    ) -> Result<Option<User>, RosterError> {
        let row: Option<Wrapper> = sqlx::query_as(UPDATE)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(&profile.role)
            .bind(time::to_sortable(&at))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| unique_or_storage(err, "User", "email"))?;

        Ok(Wrapper::maybe(row))
    }

    async fn archive(&self, id: UserId, at: Timestamp) -> Result<Option<User>, RosterError> {
        let row: Option<Wrapper> = sqlx::query_as(ARCHIVE)
            .bind(time::to_sortable(&at))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn delete(&self, id: UserId) -> Result<bool, RosterError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
