//! Log: an activity record (login, logout, …) owned by a single user.

use serde::{Deserialize, Serialize};

use crate::error::{RosterError, ValidationError};
use crate::id::{LogId, UserId};
use crate::time::{self, Timestamp};

/// A persisted activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub id: LogId,
    pub user_id: UserId,
    pub action: String,
    pub timestamp: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for recording a new [`Log`]; the owner is resolved separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLog {
    pub action: String,
    pub timestamp: Timestamp,
}

impl NewLog {
    /// Create a builder for constructing a [`NewLog`].
    #[must_use]
    pub fn builder() -> NewLogBuilder {
        NewLogBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] when `action` is empty.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.action.trim().is_empty() {
            return Err(ValidationError::MissingField("action").into());
        }
        Ok(())
    }
}

/// Caller-supplied log fields, not yet parsed or validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogDraft {
    pub action: Option<String>,
    /// RFC 3339 text.
    pub timestamp: Option<String>,
}

impl LogDraft {
    /// Parse the timestamp and validate into a [`NewLog`].
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] when the timestamp does not parse
    /// or a field is missing.
    pub fn into_new_log(self) -> Result<NewLog, RosterError> {
        let mut builder = NewLog::builder();
        if let Some(action) = self.action {
            builder = builder.action(action);
        }
        if let Some(raw) = self.timestamp {
            builder = builder.timestamp(time::parse(&raw)?);
        }
        builder.build()
    }
}

/// Step-by-step builder for [`NewLog`].
#[derive(Debug, Default)]
pub struct NewLogBuilder {
    action: Option<String>,
    timestamp: Option<Timestamp>,
}

impl NewLogBuilder {
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Consume the builder, validate, and return a [`NewLog`].
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] if `action` or `timestamp` is
    /// missing.
    pub fn build(self) -> Result<NewLog, RosterError> {
        let timestamp = self
            .timestamp
            .ok_or(ValidationError::MissingField("timestamp"))?;
        let log = NewLog {
            action: self.action.unwrap_or_default(),
            timestamp,
        };
        log.validate()?;
        Ok(log)
    }
}
