//! User: a person with a role, soft-deletable through the `archived` flag.

use serde::{Deserialize, Serialize};

use crate::error::{RosterError, ValidationError};
use crate::id::UserId;
use crate::time::Timestamp;

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The caller-controlled fields of a [`User`], used for both creation and
/// full overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserProfile {
    /// Create a builder for constructing a [`UserProfile`].
    #[must_use]
    pub fn builder() -> UserProfileBuilder {
        UserProfileBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] when `name`, `email` or `role`
    /// is empty.
    pub fn validate(&self) -> Result<(), RosterError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("role", &self.role),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field).into());
            }
        }
        Ok(())
    }
}

/// Step-by-step builder for [`UserProfile`].
#[derive(Debug, Default)]
pub struct UserProfileBuilder {
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
}

impl UserProfileBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Consume the builder, validate, and return a [`UserProfile`].
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] naming the first missing field.
    pub fn build(self) -> Result<UserProfile, RosterError> {
        let profile = UserProfile {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_profile_when_all_fields_provided() {
        let profile = UserProfile::builder()
            .name("Ann")
            .email("a@x.com")
            .role("admin")
            .build()
            .unwrap();
        assert_eq!(profile.name, "Ann");
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.role, "admin");
    }

    #[test]
    fn should_return_validation_error_when_email_missing() {
        let result = UserProfile::builder().name("Ann").role("admin").build();
        assert!(matches!(
            result,
            Err(RosterError::Validation(ValidationError::MissingField("email")))
        ));
    }

    #[test]
    fn should_reject_blank_role() {
        let result = UserProfile::builder()
            .name("Ann")
            .email("a@x.com")
            .role("   ")
            .build();
        assert!(matches!(
            result,
            Err(RosterError::Validation(ValidationError::MissingField("role")))
        ));
    }

    #[test]
    fn should_serialize_with_archived_flag() {
        let now = crate::time::now();
        let user = User {
            id: UserId::new(1),
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            role: "admin".to_string(),
            archived: false,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["archived"], false);
        assert_eq!(json["email"], "a@x.com");
    }
}
