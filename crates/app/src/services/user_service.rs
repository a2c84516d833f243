//! User service: use-cases for managing users.

use roster_domain::error::{NotFoundError, RosterError};
use roster_domain::id::UserId;
use roster_domain::time;
use roster_domain::user::{User, UserProfile};

use crate::ports::{ArchiveScope, SearchField, UserRepository};

fn user_not_found(key: impl ToString) -> RosterError {
    NotFoundError {
        entity: "User",
        key: key.to_string(),
    }
    .into()
}

/// Application service for user operations.
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new user after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] if invariants fail,
    /// [`RosterError::Conflict`] if the email is taken, or a storage error.
    #[tracing::instrument(skip(self, profile), fields(email = %profile.email))]
    pub async fn create_user(&self, profile: UserProfile) -> Result<User, RosterError> {
        profile.validate()?;
        self.repo.create(profile, time::now()).await
    }

    /// List users that are not archived.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_active_users(&self) -> Result<Vec<User>, RosterError> {
        self.repo.list(ArchiveScope::Active).await
    }

    /// List archived users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_archived_users(&self) -> Result<Vec<User>, RosterError> {
        self.repo.list(ArchiveScope::Archived).await
    }

    /// Look up a non-archived user by email.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when no active user has `email`,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_active_user_by_email(&self, email: &str) -> Result<User, RosterError> {
        self.repo
            .find_by_email(email, ArchiveScope::Active)
            .await?
            .ok_or_else(|| user_not_found(email))
    }

    /// List users with the given role, including archived ones.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users_by_role(&self, role: &str) -> Result<Vec<User>, RosterError> {
        self.repo.find_by_role(role).await
    }

    /// Users whose name contains `fragment`, including archived ones.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<User>, RosterError> {
        self.repo.search(SearchField::Name, fragment).await
    }

    /// Users whose email contains `fragment`, including archived ones.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn search_by_email(&self, fragment: &str) -> Result<Vec<User>, RosterError> {
        self.repo.search(SearchField::Email, fragment).await
    }

    /// Overwrite the profile of an existing user.
    ///
    /// `profile` is checked only once the user is known to exist. A blank
    /// field or an email held by another user is reported as
    /// [`RosterError::Storage`] carrying the invariant's message.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when `id` is unknown, or
    /// [`RosterError::Storage`] when the write is refused or fails.
    #[tracing::instrument(skip(self, profile))]
    pub async fn update_user(&self, id: UserId, profile: UserProfile) -> Result<User, RosterError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(user_not_found(id));
        }
        profile.validate().map_err(RosterError::into_storage)?;
        self.repo
            .update(id, profile, time::now())
            .await
            .map_err(RosterError::into_storage)?
            .ok_or_else(|| user_not_found(id))
    }

    /// Soft-delete a user.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when `id` is unknown, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn archive_user(&self, id: UserId) -> Result<User, RosterError> {
        self.repo
            .archive(id, time::now())
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    /// Hard-delete a user together with its logs.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when `id` is unknown, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), RosterError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(user_not_found(id))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use roster_domain::error::{ConflictError, ValidationError};
    use roster_domain::time::Timestamp;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct InMemoryUserRepo {
        store: Mutex<Vec<User>>,
    }

    impl InMemoryUserRepo {
        fn matching(&self, predicate: impl Fn(&User) -> bool) -> Vec<User> {
            let store = self.store.lock().unwrap();
            store.iter().filter(|&u| predicate(u)).cloned().collect()
        }
    }

    impl UserRepository for InMemoryUserRepo {
        fn create(
            &self,
            profile: UserProfile,
            at: Timestamp,
        ) -> impl Future<Output = Result<User, RosterError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result: Result<User, RosterError> = if store
                .iter()
                .any(|u| u.email == profile.email)
            {
                Err(ConflictError {
                    entity: "User",
                    field: "email",
                }
                .into())
            } else {
                let id = store.iter().map(|u| u.id.get()).max().unwrap_or(0) + 1;
                let user = User {
                    id: UserId::new(id),
                    name: profile.name,
                    email: profile.email,
                    role: profile.role,
                    archived: false,
                    created_at: at,
                    updated_at: at,
                };
                store.push(user.clone());
                Ok(user)
            };
            async { result }
        }

        fn find_by_id(
            &self,
            id: UserId,
        ) -> impl Future<Output = Result<Option<User>, RosterError>> + Send {
            let found = self.matching(|u| u.id == id).into_iter().next();
            async { Ok(found) }
        }

        fn find_by_email(
            &self,
            email: &str,
            scope: ArchiveScope,
        ) -> impl Future<Output = Result<Option<User>, RosterError>> + Send {
            let found = self
                .matching(|u| u.email == email && scope.admits(u.archived))
                .into_iter()
                .next();
            async { Ok(found) }
        }

        fn list(
            &self,
            scope: ArchiveScope,
        ) -> impl Future<Output = Result<Vec<User>, RosterError>> + Send {
            let users = self.matching(|u| scope.admits(u.archived));
            async { Ok(users) }
        }

        fn find_by_role(
            &self,
            role: &str,
        ) -> impl Future<Output = Result<Vec<User>, RosterError>> + Send {
            let users = self.matching(|u| u.role == role);
            async { Ok(users) }
        }

        fn search(
            &self,
            field: SearchField,
            fragment: &str,
        ) -> impl Future<Output = Result<Vec<User>, RosterError>> + Send {
            let needle = fragment.to_ascii_lowercase();
            let users = self.matching(|u| {
                let haystack = match field {
                    SearchField::Name => &u.name,
                    SearchField::Email => &u.email,
                };
                haystack.to_ascii_lowercase().contains(&needle)
            });
            async { Ok(users) }
        }

        fn update(
            &self,
            id: UserId,
            profile: UserProfile,
            at: Timestamp,
        ) -> impl Future<Output = Result<Option<User>, RosterError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result: Result<Option<User>, RosterError> = if store
                .iter()
                .any(|u| u.id != id && u.email == profile.email)
            {
                Err(ConflictError {
                    entity: "User",
                    field: "email",
                }
                .into())
            } else {
                Ok(store.iter_mut().find(|u| u.id == id).map(|u| {
                    u.name = profile.name;
                    u.email = profile.email;
                    u.role = profile.role;
                    u.updated_at = at;
                    u.clone()
                }))
            };
            async { result }
        }

        fn archive(
            &self,
            id: UserId,
            at: Timestamp,
        ) -> impl Future<Output = Result<Option<User>, RosterError>> + Send {
            let mut store = self.store.lock().unwrap();
            let archived = store.iter_mut().find(|u| u.id == id).map(|u| {
                u.archived = true;
                u.updated_at = at;
                u.clone()
            });
            async { Ok(archived) }
        }

        fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, RosterError>> + Send {
            let mut store = self.store.lock().unwrap();
            let before = store.len();
            store.retain(|u| u.id != id);
            let removed = store.len() != before;
            async move { Ok(removed) }
        }
    }

    fn make_service() -> UserService<InMemoryUserRepo> {
        UserService::new(InMemoryUserRepo::default())
    }

    fn profile(name: &str, email: &str, role: &str) -> UserProfile {
        UserProfile::builder()
            .name(name)
            .email(email)
            .role(role)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_user_and_find_it_by_email() {
        let svc = make_service();
        let created = svc
            .create_user(profile("Ann", "a@x.com", "admin"))
            .await
            .unwrap();
        assert!(!created.archived);

        let fetched = svc.get_active_user_by_email("a@x.com").await.unwrap();
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn should_reject_create_when_name_is_blank() {
        let svc = make_service();
        let mut invalid = profile("Ann", "a@x.com", "admin");
        invalid.name = String::new();

        let result = svc.create_user(invalid).await;
        assert!(matches!(
            result,
            Err(RosterError::Validation(ValidationError::MissingField("name")))
        ));
    }

    #[tokio::test]
    async fn should_propagate_conflict_on_duplicate_email() {
        let svc = make_service();
        svc.create_user(profile("Ann", "a@x.com", "admin"))
            .await
            .unwrap();

        let result = svc.create_user(profile("Bob", "a@x.com", "user")).await;
        assert!(matches!(result, Err(RosterError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_hide_archived_user_from_default_views_only() {
        let svc = make_service();
        let ann = svc
            .create_user(profile("Ann", "a@x.com", "admin"))
            .await
            .unwrap();
        svc.create_user(profile("Bob", "b@x.com", "admin"))
            .await
            .unwrap();

        let archived = svc.archive_user(ann.id).await.unwrap();
        assert!(archived.archived);

        let active = svc.list_active_users().await.unwrap();
        assert_eq!(active.len(), 1);
        assert!(matches!(
            svc.get_active_user_by_email("a@x.com").await,
            Err(RosterError::NotFound(_))
        ));

        assert_eq!(svc.list_archived_users().await.unwrap().len(), 1);
        assert_eq!(svc.list_users_by_role("admin").await.unwrap().len(), 2);
        assert_eq!(svc.search_by_name("ann").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_update_user_profile() {
        let svc = make_service();
        let ann = svc
            .create_user(profile("Ann", "a@x.com", "admin"))
            .await
            .unwrap();

        let updated = svc
            .update_user(ann.id, profile("Anna", "anna@x.com", "user"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Anna");
        assert_eq!(updated.email, "anna@x.com");
        assert_eq!(updated.role, "user");
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_unknown_user() {
        let svc = make_service();
        let result = svc
            .update_user(UserId::new(99), profile("Ann", "a@x.com", "admin"))
            .await;
        assert!(matches!(result, Err(RosterError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_report_update_to_taken_email_as_storage_failure() {
        let svc = make_service();
        svc.create_user(profile("Ann", "a@x.com", "admin"))
            .await
            .unwrap();
        let bob = svc
            .create_user(profile("Bob", "b@x.com", "user"))
            .await
            .unwrap();

        let err = svc
            .update_user(bob.id, profile("Bob", "a@x.com", "user"))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Storage(_)));
        assert_eq!(err.to_string(), "User with this email already exists");
    }

    #[tokio::test]
    async fn should_report_blank_update_field_as_storage_failure() {
        let svc = make_service();
        let ann = svc
            .create_user(profile("Ann", "a@x.com", "admin"))
            .await
            .unwrap();
        let mut blank = profile("Ann", "a@x.com", "admin");
        blank.role = String::new();

        let err = svc.update_user(ann.id, blank).await.unwrap_err();
        assert!(matches!(err, RosterError::Storage(_)));
        assert_eq!(err.to_string(), "role is required");
    }

    #[tokio::test]
    async fn should_prefer_not_found_over_invalid_update() {
        let svc = make_service();
        let mut blank = profile("Ann", "a@x.com", "admin");
        blank.name = String::new();

        let result = svc.update_user(UserId::new(42), blank).await;
        assert!(matches!(result, Err(RosterError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_archiving_unknown_user() {
        let svc = make_service();
        let result = svc.archive_user(UserId::new(99)).await;
        assert!(matches!(result, Err(RosterError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_user_once() {
        let svc = make_service();
        let ann = svc
            .create_user(profile("Ann", "a@x.com", "admin"))
            .await
            .unwrap();

        svc.delete_user(ann.id).await.unwrap();
        let again = svc.delete_user(ann.id).await;
        assert!(matches!(again, Err(RosterError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_search_email_by_fragment() {
        let svc = make_service();
        svc.create_user(profile("Ann", "ann@example.com", "admin"))
            .await
            .unwrap();
        svc.create_user(profile("Bob", "bob@test.org", "user"))
            .await
            .unwrap();

        let found = svc.search_by_email("EXAMPLE").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ann");
    }
}
