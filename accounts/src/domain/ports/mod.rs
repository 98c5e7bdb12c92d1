//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the deactivation flow expects to interact with driven
//! adapters (the relational store, the background job queue, the audit
//! stores). Each trait exposes strongly typed errors so adapters map their
//! failures into predictable variants.

mod audit_log;
mod favorites_queue;
mod saved_search_repository;
mod user_repository;

#[cfg(test)]
pub use audit_log::MockAuditLog;
pub use audit_log::{AuditLog, AuditLogError, FixtureAuditLog};
#[cfg(test)]
pub use favorites_queue::MockFavoritesQueue;
pub use favorites_queue::{
    FavoritesQueue, FixtureFavoritesQueue, JobDispatchError, RemoveFavoritesCommand,
};
#[cfg(test)]
pub use saved_search_repository::MockSavedSearchRepository;
pub use saved_search_repository::{
    FixtureSavedSearchRepository, SavedSearchPersistenceError, SavedSearchRepository,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
