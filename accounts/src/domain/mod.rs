//! Domain entities, ports, and services for account deactivation.
//!
//! Purpose: keep the deactivation rules and record mutations independent of
//! transport and storage. Entities carry their invariants in Rustdoc; the
//! ports module defines how the domain expects to talk to driven adapters.
//!
//! Public surface:
//! - User (alias to `user::User`): mutable account record.
//! - UserDeactivationService: the deactivation operation.
//! - DeactivationRequest / DeactivationError: inputs and outcomes.

pub mod audit;
pub mod config;
pub mod credentials;
pub mod deactivation;
mod deactivation_service;
pub mod ports;
pub mod saved_search;
pub mod user;

pub use self::audit::{
    ModAction, ModActionCategory, RequestContext, UserEvent, UserEventCategory,
    UserNameChangeRequest,
};
pub use self::config::{DEFAULT_TIME_ZONE, DeactivationConfig};
pub use self::credentials::{Credential, CredentialError, scramble_token};
pub use self::deactivation::{
    DeactivationError, DeactivationRefusal, DeactivationRequest, RefusalReason,
};
pub use self::deactivation_service::UserDeactivationService;
pub use self::saved_search::SavedSearch;
pub use self::user::{User, UserBuilder, UserId, UserLevel};
