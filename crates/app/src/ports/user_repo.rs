//! User repository port: persistence for users.

use std::future::Future;

use roster_domain::error::RosterError;
use roster_domain::id::UserId;
use roster_domain::time::Timestamp;
use roster_domain::user::{User, UserProfile};

/// Which users a query sees with respect to the soft-delete flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveScope {
    /// Only users with `archived = false`.
    Active,
    /// Only users with `archived = true`.
    Archived,
    /// Every user regardless of the flag.
    Any,
}

impl ArchiveScope {
    /// Whether a user with the given flag falls inside this scope.
    #[must_use]
    pub fn admits(self, archived: bool) -> bool {
        match self {
            Self::Active => !archived,
            Self::Archived => archived,
            Self::Any => true,
        }
    }
}

/// Text column targeted by a substring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Email,
}

/// Repository for persisting and querying [`User`]s.
///
/// Substring searches are literal and ASCII case-insensitive; wildcard
/// characters in the fragment never match anything but themselves.
pub trait UserRepository {
    /// Insert a new user and return the stored record.
    ///
    /// A duplicate email yields [`RosterError::Conflict`].
    fn create(
        &self,
        profile: UserProfile,
        at: Timestamp,
    ) -> impl Future<Output = Result<User, RosterError>> + Send;

    /// Find a user by id, archived or not.
    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, RosterError>> + Send;

    /// Find a user by exact email within `scope`.
    fn find_by_email(
        &self,
        email: &str,
        scope: ArchiveScope,
    ) -> impl Future<Output = Result<Option<User>, RosterError>> + Send;

    /// List users within `scope`, ordered by id.
    fn list(
        &self,
        scope: ArchiveScope,
    ) -> impl Future<Output = Result<Vec<User>, RosterError>> + Send;

    /// List users with the given role, archived or not.
    fn find_by_role(
        &self,
        role: &str,
    ) -> impl Future<Output = Result<Vec<User>, RosterError>> + Send;

    /// List users whose `field` contains `fragment`, archived or not.
    fn search(
        &self,
        field: SearchField,
        fragment: &str,
    ) -> impl Future<Output = Result<Vec<User>, RosterError>> + Send;

    /// Overwrite name, email and role. Returns `None` when `id` is unknown.
    ///
    /// An email already held by another user yields [`RosterError::Conflict`].
    fn update(
        &self,
        id: UserId,
        profile: UserProfile,
        at: Timestamp,
    ) -> impl Future<Output = Result<Option<User>, RosterError>> + Send;

    /// Set `archived = true`. Returns `None` when `id` is unknown.
    fn archive(
        &self,
        id: UserId,
        at: Timestamp,
    ) -> impl Future<Output = Result<Option<User>, RosterError>> + Send;

    /// Hard-delete a user and, through the foreign key, its logs.
    /// Returns `false` when `id` is unknown.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, RosterError>> + Send;
}
