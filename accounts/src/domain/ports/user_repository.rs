//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::User;

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// The unique constraint on account names rejected a write.
    #[error("account name {name} is already taken")]
    NameConflict { name: String },
}

impl UserPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-name violations.
    pub fn name_conflict(name: impl Into<String>) -> Self {
        Self::NameConflict { name: name.into() }
    }
}

/// Port for user record storage.
///
/// `save` must enforce the unique constraint on account names and surface
/// violations as [`UserPersistenceError::NameConflict`] so callers can retry
/// with a different candidate instead of failing outright.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Report whether any account currently holds `name`.
    async fn name_exists(&self, name: &str) -> Result<bool, UserPersistenceError>;

    /// Persist the record, inserting or updating by id.
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError>;
}

/// Fixture implementation for testing without a real database.
///
/// Reports every name as free and discards saved records. Use it in unit
/// tests where user persistence is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn name_exists(&self, _name: &str) -> Result<bool, UserPersistenceError> {
        Ok(false)
    }

    async fn save(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Ok(())
    }
}
