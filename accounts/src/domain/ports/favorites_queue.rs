//! Queue port for dispatching favorites removal work.
//!
//! Deactivation is fire-and-forget here: the flow enqueues a command and
//! never observes the job's processing outcome. At-least-once delivery is
//! the external job runner's concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::user::UserId;

/// Command enqueued for the background favorites-removal job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFavoritesCommand {
    /// The account whose favorites should be removed.
    pub user_id: UserId,
}

impl RemoveFavoritesCommand {
    /// Create a removal command for the given account.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Errors surfaced by the queue/dispatcher adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobDispatchError {
    /// Queue infrastructure is unavailable.
    #[error("favorites queue is unavailable: {message}")]
    Unavailable { message: String },
    /// The job could not be acknowledged or persisted.
    #[error("favorites job was rejected: {message}")]
    Rejected { message: String },
}

impl JobDispatchError {
    /// Helper for queue outages.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for rejected jobs.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Queue port for handing commands to the external job runner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesQueue: Send + Sync {
    /// Enqueue a command for downstream processing.
    async fn enqueue(&self, command: &RemoveFavoritesCommand) -> Result<(), JobDispatchError>;
}

/// Stub queue implementation that discards all commands.
///
/// All `enqueue` operations succeed but nothing is persisted or processed.
/// A warning is logged so developers notice if the stub is wired in
/// unintentionally.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoritesQueue;

#[async_trait]
impl FavoritesQueue for FixtureFavoritesQueue {
    async fn enqueue(&self, command: &RemoveFavoritesCommand) -> Result<(), JobDispatchError> {
        tracing::warn!(user_id = %command.user_id, "FixtureFavoritesQueue: command discarded");
        Ok(())
    }
}
