//! Port for saved search persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::UserId;

/// Persistence errors raised by [`SavedSearchRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SavedSearchPersistenceError {
    /// Repository connection could not be established.
    #[error("saved search repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("saved search repository query failed: {message}")]
    Query { message: String },
}

impl SavedSearchPersistenceError {
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
}

/// Port for saved search storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedSearchRepository: Send + Sync {
    /// Delete every saved search owned by `user_id`, returning the count
    /// removed.
    async fn delete_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<u64, SavedSearchPersistenceError>;
}

/// Fixture implementation that owns no records.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSavedSearchRepository;

#[async_trait]
impl SavedSearchRepository for FixtureSavedSearchRepository {
    async fn delete_by_user_id(
        &self,
        _user_id: UserId,
    ) -> Result<u64, SavedSearchPersistenceError> {
        Ok(0)
    }
}
