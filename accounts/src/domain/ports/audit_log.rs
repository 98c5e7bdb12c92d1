//! Port for the append-only audit stores.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audit::{ModAction, UserEvent, UserNameChangeRequest};

/// Errors raised by [`AuditLog`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditLogError {
    /// Audit store connection could not be established.
    #[error("audit log connection failed: {message}")]
    Connection { message: String },
    /// The entry could not be appended.
    #[error("audit log write failed: {message}")]
    Write { message: String },
}

impl AuditLogError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for write failures.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Port for recording the audit trail of moderation-relevant operations.
///
/// Entries are append-only; adapters never update or delete them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append a moderation log entry.
    async fn record_mod_action(&self, action: &ModAction) -> Result<(), AuditLogError>;

    /// Append a user event log entry.
    async fn record_user_event(&self, event: &UserEvent) -> Result<(), AuditLogError>;

    /// Append a rename audit record.
    async fn record_name_change(
        &self,
        change: &UserNameChangeRequest,
    ) -> Result<(), AuditLogError>;
}

/// Fixture implementation that discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuditLog;

#[async_trait]
impl AuditLog for FixtureAuditLog {
    async fn record_mod_action(&self, _action: &ModAction) -> Result<(), AuditLogError> {
        Ok(())
    }

    async fn record_user_event(&self, _event: &UserEvent) -> Result<(), AuditLogError> {
        Ok(())
    }

    async fn record_name_change(
        &self,
        _change: &UserNameChangeRequest,
    ) -> Result<(), AuditLogError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::audit::ModActionCategory;
    use crate::domain::user::UserId;

    #[tokio::test]
    async fn fixture_log_accepts_entries() {
        let log = FixtureAuditLog;
        let action = ModAction::new(
            ModActionCategory::UserDelete,
            "deleted user #1",
            UserId::new(2),
            Utc::now(),
        );

        log.record_mod_action(&action)
            .await
            .expect("fixture append should succeed");
    }

    #[rstest]
    fn write_errors_format_with_detail() {
        let error = AuditLogError::write("disk full");
        assert_eq!(error.to_string(), "audit log write failed: disk full");
    }
}
