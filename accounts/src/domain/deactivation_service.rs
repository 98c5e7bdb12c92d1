//! Account deactivation domain service.
//!
//! Orchestrates the validated teardown of a user account: rule checks,
//! settings scrub, favorites and saved search removal, anonymising rename,
//! credential invalidation, and the audit trail. Deactivation never removes
//! the record itself.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::audit::{
    ModAction, ModActionCategory, RequestContext, UserEvent, UserEventCategory,
    UserNameChangeRequest,
};
use crate::domain::config::DeactivationConfig;
use crate::domain::credentials::{Credential, scramble_token};
use crate::domain::deactivation::{
    DeactivationError, DeactivationRefusal, DeactivationRequest, RefusalReason,
};
use crate::domain::ports::{
    AuditLog, FavoritesQueue, RemoveFavoritesCommand, SavedSearchRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::user::{User, UserId};

/// Domain service implementing the account deactivation operation.
#[derive(Clone)]
pub struct UserDeactivationService<U, S, Q, A> {
    users: Arc<U>,
    saved_searches: Arc<S>,
    favorites_queue: Arc<Q>,
    audit_log: Arc<A>,
    clock: Arc<dyn Clock>,
    config: DeactivationConfig,
}

impl<U, S, Q, A> UserDeactivationService<U, S, Q, A> {
    /// Create a new service over the given ports.
    pub fn new(
        users: Arc<U>,
        saved_searches: Arc<S>,
        favorites_queue: Arc<Q>,
        audit_log: Arc<A>,
        clock: Arc<dyn Clock>,
        config: DeactivationConfig,
    ) -> Self {
        Self {
            users,
            saved_searches,
            favorites_queue,
            audit_log,
            clock,
            config,
        }
    }
}

impl<U, S, Q, A> UserDeactivationService<U, S, Q, A>
where
    U: UserRepository,
    S: SavedSearchRepository,
    Q: FavoritesQueue,
    A: AuditLog,
{
    /// Attempt the deactivation.
    ///
    /// Returns the mutated user on success. [`DeactivationError::Refused`]
    /// means nothing was mutated; any later failure propagates and leaves
    /// the steps that already ran committed.
    pub async fn attempt(&self, request: DeactivationRequest) -> Result<User, DeactivationError> {
        let now = self.clock.utc();
        validate(&request, &self.config, now)?;

        let DeactivationRequest {
            mut user,
            deleter,
            context,
            ..
        } = request;

        self.scrub_settings(&mut user).await?;
        self.remove_favorites(&user).await?;
        self.clear_saved_searches(&user).await?;
        self.rename(&mut user, now).await?;
        self.invalidate_credential(&mut user).await?;
        self.record_audit_trail(&user, &deleter, context.as_ref(), now)
            .await?;

        tracing::info!(
            user_id = %user.id,
            deleter_id = %deleter.id,
            name = %user.name,
            "account deactivated"
        );
        Ok(user)
    }

    async fn scrub_settings(&self, user: &mut User) -> Result<(), DeactivationError> {
        user.email.clear();
        user.last_logged_in_at = None;
        user.last_forum_read_at = None;
        user.favorite_tags.clear();
        user.blacklisted_tags.clear();
        user.show_deleted_children = false;
        user.time_zone.clone_from(&self.config.default_time_zone);
        self.users.save(user).await?;
        Ok(())
    }

    async fn remove_favorites(&self, user: &User) -> Result<(), DeactivationError> {
        self.favorites_queue
            .enqueue(&RemoveFavoritesCommand::new(user.id))
            .await?;
        Ok(())
    }

    async fn clear_saved_searches(&self, user: &User) -> Result<(), DeactivationError> {
        let removed = self.saved_searches.delete_by_user_id(user.id).await?;
        tracing::debug!(user_id = %user.id, removed, "cleared saved searches");
        Ok(())
    }

    async fn rename(&self, user: &mut User, now: DateTime<Utc>) -> Result<(), DeactivationError> {
        let original_name = user.name.clone();
        let mut candidate = placeholder_name(user.id);
        loop {
            while self.users.name_exists(&candidate).await? {
                candidate.push('~');
            }
            user.name.clone_from(&candidate);
            match self.users.save(user).await {
                Ok(()) => break,
                // A concurrent rename claimed the candidate between the
                // existence probe and the write; keep probing.
                Err(UserPersistenceError::NameConflict { .. }) => candidate.push('~'),
                Err(err) => return Err(err.into()),
            }
        }

        let change = UserNameChangeRequest::new(user.id, original_name, user.name.clone(), now);
        self.audit_log.record_name_change(&change).await?;
        Ok(())
    }

    async fn invalidate_credential(&self, user: &mut User) -> Result<(), DeactivationError> {
        let replacement = scramble_token();
        user.credential = Credential::from_password(&replacement)?;
        self.users.save(user).await?;
        Ok(())
    }

    async fn record_audit_trail(
        &self,
        user: &User,
        deleter: &User,
        context: Option<&RequestContext>,
        now: DateTime<Utc>,
    ) -> Result<(), DeactivationError> {
        let action = ModAction::new(
            ModActionCategory::UserDelete,
            format!("deleted user #{}", user.id),
            deleter.id,
            now,
        );
        self.audit_log.record_mod_action(&action).await?;

        if let Some(context) = context {
            let event =
                UserEvent::from_context(user.id, UserEventCategory::UserDeletion, context, now);
            self.audit_log.record_user_event(&event).await?;
        }
        Ok(())
    }
}

fn validate(
    request: &DeactivationRequest,
    config: &DeactivationConfig,
    now: DateTime<Utc>,
) -> Result<(), DeactivationError> {
    let user = &request.user;
    let mut reasons = Vec::new();

    if request.is_self_deletion() {
        let confirmed = request
            .password
            .as_ref()
            .is_some_and(|password| user.verify_password(password));
        if !confirmed {
            reasons.push(RefusalReason::IncorrectPassword);
        }
        if user.is_admin() {
            reasons.push(RefusalReason::AdminAccount);
        }
        if user.is_banned {
            reasons.push(RefusalReason::BannedAccount);
        }
    } else {
        if !request.deleter.is_owner() {
            reasons.push(RefusalReason::ActorNotOwner);
        }
        if user.is_gold() {
            reasons.push(RefusalReason::PrivilegedAccount);
        }
        if account_is_protected(user.created_at, config, now) {
            reasons.push(RefusalReason::RecentAccount);
        }
    }

    if reasons.is_empty() {
        Ok(())
    } else {
        Err(DeactivationError::Refused(DeactivationRefusal::new(
            reasons,
        )))
    }
}

fn account_is_protected(
    created_at: DateTime<Utc>,
    config: &DeactivationConfig,
    now: DateTime<Utc>,
) -> bool {
    match now.checked_sub_months(config.protected_account_age) {
        Some(cutoff) => created_at > cutoff,
        // The cutoff fell off the calendar; leave the account protected.
        None => true,
    }
}

fn placeholder_name(id: UserId) -> String {
    format!("user_{id}")
}

#[cfg(test)]
#[path = "deactivation_service_tests.rs"]
mod tests;
