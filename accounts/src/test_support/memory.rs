//! In-memory port implementations backed by mutex-guarded collections.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::audit::{ModAction, UserEvent, UserNameChangeRequest};
use crate::domain::ports::{
    AuditLog, AuditLogError, FavoritesQueue, JobDispatchError, RemoveFavoritesCommand,
    SavedSearchPersistenceError, SavedSearchRepository, UserPersistenceError, UserRepository,
};
use crate::domain::saved_search::SavedSearch;
use crate::domain::user::{User, UserId};

/// User store keyed by id, enforcing the unique constraint on names the way
/// the relational adapter would.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user record, bypassing the unique-name check.
    pub fn insert(&self, user: User) {
        self.users
            .lock()
            .expect("user store poisoned")
            .insert(user.id, user);
    }

    /// Snapshot a stored record.
    #[must_use]
    pub fn get(&self, id: UserId) -> Option<User> {
        self.users.lock().expect("user store poisoned").get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn name_exists(&self, name: &str) -> Result<bool, UserPersistenceError> {
        let guard = self.users.lock().expect("user store poisoned");
        Ok(guard.values().any(|user| user.name == name))
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut guard = self.users.lock().expect("user store poisoned");
        if guard
            .values()
            .any(|existing| existing.name == user.name && existing.id != user.id)
        {
            return Err(UserPersistenceError::name_conflict(user.name.clone()));
        }
        guard.insert(user.id, user.clone());
        Ok(())
    }
}

/// Saved search store over a plain vector.
#[derive(Debug, Default)]
pub struct InMemorySavedSearchRepository {
    searches: Mutex<Vec<SavedSearch>>,
}

impl InMemorySavedSearchRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a saved search record.
    pub fn insert(&self, search: SavedSearch) {
        self.searches
            .lock()
            .expect("search store poisoned")
            .push(search);
    }

    /// Count the records owned by `user_id`.
    #[must_use]
    pub fn count_for(&self, user_id: UserId) -> usize {
        self.searches
            .lock()
            .expect("search store poisoned")
            .iter()
            .filter(|search| search.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl SavedSearchRepository for InMemorySavedSearchRepository {
    async fn delete_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<u64, SavedSearchPersistenceError> {
        let mut guard = self.searches.lock().expect("search store poisoned");
        let before = guard.len();
        guard.retain(|search| search.user_id != user_id);
        let removed = before - guard.len();
        Ok(u64::try_from(removed).expect("count fits in u64"))
    }
}

/// Queue double that records every enqueued command.
#[derive(Debug, Default)]
pub struct RecordingFavoritesQueue {
    commands: Mutex<Vec<RemoveFavoritesCommand>>,
}

impl RecordingFavoritesQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the enqueued commands in arrival order.
    #[must_use]
    pub fn commands(&self) -> Vec<RemoveFavoritesCommand> {
        self.commands.lock().expect("queue poisoned").clone()
    }
}

#[async_trait]
impl FavoritesQueue for RecordingFavoritesQueue {
    async fn enqueue(&self, command: &RemoveFavoritesCommand) -> Result<(), JobDispatchError> {
        self.commands.lock().expect("queue poisoned").push(*command);
        Ok(())
    }
}

/// Audit double that records every appended entry.
#[derive(Debug, Default)]
pub struct RecordingAuditLog {
    mod_actions: Mutex<Vec<ModAction>>,
    user_events: Mutex<Vec<UserEvent>>,
    name_changes: Mutex<Vec<UserNameChangeRequest>>,
}

impl RecordingAuditLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the moderation log entries.
    #[must_use]
    pub fn mod_actions(&self) -> Vec<ModAction> {
        self.mod_actions.lock().expect("audit log poisoned").clone()
    }

    /// Snapshot the user event log entries.
    #[must_use]
    pub fn user_events(&self) -> Vec<UserEvent> {
        self.user_events.lock().expect("audit log poisoned").clone()
    }

    /// Snapshot the rename audit records.
    #[must_use]
    pub fn name_changes(&self) -> Vec<UserNameChangeRequest> {
        self.name_changes
            .lock()
            .expect("audit log poisoned")
            .clone()
    }
}

#[async_trait]
impl AuditLog for RecordingAuditLog {
    async fn record_mod_action(&self, action: &ModAction) -> Result<(), AuditLogError> {
        self.mod_actions
            .lock()
            .expect("audit log poisoned")
            .push(action.clone());
        Ok(())
    }

    async fn record_user_event(&self, event: &UserEvent) -> Result<(), AuditLogError> {
        self.user_events
            .lock()
            .expect("audit log poisoned")
            .push(event.clone());
        Ok(())
    }

    async fn record_name_change(
        &self,
        change: &UserNameChangeRequest,
    ) -> Result<(), AuditLogError> {
        self.name_changes
            .lock()
            .expect("audit log poisoned")
            .push(change.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::credentials::Credential;

    fn make_user(id: i64, name: &str) -> User {
        let credential = Credential::from_password("pw").expect("hashing should succeed");
        User::builder(UserId::new(id), name, credential).build()
    }

    #[tokio::test]
    async fn save_enforces_the_unique_name_constraint() {
        let repo = InMemoryUserRepository::new();
        repo.insert(make_user(1, "user_1"));

        let pretender = make_user(2, "user_1");
        let error = repo.save(&pretender).await.expect_err("name is taken");
        assert_eq!(error, UserPersistenceError::name_conflict("user_1"));

        // Re-saving the holder under its own name is not a conflict.
        let holder = repo.get(UserId::new(1)).expect("seeded");
        repo.save(&holder).await.expect("own name is fine");
    }

    #[tokio::test]
    async fn delete_by_user_id_counts_removed_records() {
        use chrono::Utc;

        let repo = InMemorySavedSearchRepository::new();
        repo.insert(SavedSearch::new(UserId::new(1), "query a", Utc::now()));
        repo.insert(SavedSearch::new(UserId::new(1), "query b", Utc::now()));
        repo.insert(SavedSearch::new(UserId::new(2), "keep me", Utc::now()));

        let removed = repo
            .delete_by_user_id(UserId::new(1))
            .await
            .expect("delete succeeds");
        assert_eq!(removed, 2);
        assert_eq!(repo.count_for(UserId::new(1)), 0);
        assert_eq!(repo.count_for(UserId::new(2)), 1);
    }
}
