//! Deactivation inputs, refusal reasons, and operation errors.
//!
//! Refusals stay transport agnostic: each reason carries a stable code and
//! a canonical message so inbound adapters can map them to protocol-specific
//! payloads without re-encoding the rules.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use super::audit::RequestContext;
use super::credentials::CredentialError;
use super::ports::{
    AuditLogError, JobDispatchError, SavedSearchPersistenceError, UserPersistenceError,
};
use super::user::User;

/// Normalised reasons a deactivation attempt can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// The confirming password did not verify.
    IncorrectPassword,
    /// Admins may not deactivate their own account.
    AdminAccount,
    /// Banned accounts may not self-deactivate.
    BannedAccount,
    /// Only the owner may deactivate another user's account.
    ActorNotOwner,
    /// Privileged (gold or above) accounts are exempt from third-party
    /// deactivation.
    PrivilegedAccount,
    /// The account is still inside the protection window for new accounts.
    RecentAccount,
}

impl RefusalReason {
    /// Machine-readable refusal code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IncorrectPassword => "incorrect_password",
            Self::AdminAccount => "admin_account",
            Self::BannedAccount => "banned_account",
            Self::ActorNotOwner => "actor_not_owner",
            Self::PrivilegedAccount => "privileged_account",
            Self::RecentAccount => "recent_account",
        }
    }

    /// Human-readable policy message shared across adapters.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::IncorrectPassword => "Password is incorrect",
            Self::AdminAccount => "Admins cannot delete their account",
            Self::BannedAccount => "You cannot delete your account if you are banned",
            Self::ActorNotOwner => "You cannot delete an account belonging to another user",
            Self::PrivilegedAccount => "You cannot delete a privileged account",
            Self::RecentAccount => "You cannot delete a recent account",
        }
    }
}

/// Validation failure carrying every rule that refused the attempt.
///
/// ## Invariants
/// - `reasons` is non-empty and preserves rule evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeactivationRefusal {
    reasons: Vec<RefusalReason>,
}

impl DeactivationRefusal {
    pub(crate) fn new(reasons: Vec<RefusalReason>) -> Self {
        Self { reasons }
    }

    /// Every refused rule, in evaluation order.
    #[must_use]
    pub fn reasons(&self) -> &[RefusalReason] {
        self.reasons.as_slice()
    }

    /// Canonical messages for every refused rule.
    #[must_use]
    pub fn messages(&self) -> Vec<&'static str> {
        self.reasons.iter().map(RefusalReason::message).collect()
    }
}

impl fmt::Display for DeactivationRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for DeactivationRefusal {}

/// Outcomes of a failed deactivation attempt.
///
/// [`DeactivationError::Refused`] means no mutation happened. Every other
/// variant is fatal and leaves steps that already ran committed; the
/// operation is not transactional.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeactivationError {
    /// The validator refused the attempt.
    #[error("account deactivation refused: {0}")]
    Refused(DeactivationRefusal),
    /// The user store failed mid-flow.
    #[error(transparent)]
    UserPersistence(#[from] UserPersistenceError),
    /// The saved search store failed mid-flow.
    #[error(transparent)]
    SavedSearchPersistence(#[from] SavedSearchPersistenceError),
    /// The favorites-removal command could not be enqueued.
    #[error(transparent)]
    QueueDispatch(#[from] JobDispatchError),
    /// An audit entry could not be appended.
    #[error(transparent)]
    AuditLog(#[from] AuditLogError),
    /// The replacement credential could not be derived.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Inputs to a deactivation attempt.
///
/// # Examples
///
/// ```
/// use accounts::domain::{Credential, DeactivationRequest, User, UserId};
///
/// let credential = Credential::from_password("hunter2").expect("hashing succeeds");
/// let user = User::builder(UserId::new(42), "rust_fan", credential).build();
///
/// let request = DeactivationRequest::self_service(user, "hunter2");
/// assert!(request.is_self_deletion());
/// ```
#[derive(Debug, Clone)]
pub struct DeactivationRequest {
    /// Account being deactivated.
    pub user: User,
    /// Account performing the deactivation.
    pub deleter: User,
    /// Confirming password for self-service attempts.
    pub password: Option<Zeroizing<String>>,
    /// Request metadata for the user event log, when invoked over HTTP.
    pub context: Option<RequestContext>,
}

impl DeactivationRequest {
    /// Self-service deactivation: the holder confirms with their password.
    #[must_use]
    pub fn self_service(user: User, password: impl Into<String>) -> Self {
        Self {
            deleter: user.clone(),
            user,
            password: Some(Zeroizing::new(password.into())),
            context: None,
        }
    }

    /// Deactivation of another user's account by a privileged actor.
    #[must_use]
    pub fn by_moderator(user: User, deleter: User) -> Self {
        Self {
            user,
            deleter,
            password: None,
            context: None,
        }
    }

    /// Attach request metadata so the attempt lands in the user event log.
    #[must_use]
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Whether the target is deactivating their own account.
    #[must_use]
    pub fn is_self_deletion(&self) -> bool {
        self.user.id == self.deleter.id
    }
}
