//! Append-only audit records written during account deactivation.
//!
//! These records are created and never mutated. Their stores are driven
//! adapters; the domain only shapes the payloads.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Moderation log categories recorded by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ModActionCategory {
    /// A user account was deactivated.
    UserDelete,
}

impl ModActionCategory {
    /// Returns the database string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserDelete => "user_delete",
        }
    }
}

/// Moderation log entry naming the actor and describing the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModAction {
    /// Action category.
    pub category: ModActionCategory,
    /// Human-readable description, e.g. `deleted user #42`.
    pub description: String,
    /// The acting user.
    pub creator_id: UserId,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

impl ModAction {
    /// Create a moderation log entry.
    pub fn new(
        category: ModActionCategory,
        description: impl Into<String>,
        creator_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            category,
            description: description.into(),
            creator_id,
            created_at,
        }
    }
}

/// User event log categories recorded by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum UserEventCategory {
    /// The account was deactivated.
    UserDeletion,
}

impl UserEventCategory {
    /// Returns the database string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserDeletion => "user_deletion",
        }
    }
}

/// Request metadata supplied by the inbound layer for event logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Originating address.
    pub ip_addr: IpAddr,
    /// Session identifier, when one was established.
    pub session_id: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Create a context carrying only the originating address.
    #[must_use]
    pub const fn new(ip_addr: IpAddr) -> Self {
        Self {
            ip_addr,
            session_id: None,
            user_agent: None,
        }
    }

    /// Attach a session identifier.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Attach a client user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Security-relevant event attributed to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEvent {
    /// The account the event concerns.
    pub user_id: UserId,
    /// Event category.
    pub category: UserEventCategory,
    /// Originating address.
    pub ip_addr: IpAddr,
    /// Session identifier, when one was established.
    pub session_id: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

impl UserEvent {
    /// Build an event from inbound request metadata.
    #[must_use]
    pub fn from_context(
        user_id: UserId,
        category: UserEventCategory,
        context: &RequestContext,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            category,
            ip_addr: context.ip_addr,
            session_id: context.session_id.clone(),
            user_agent: context.user_agent.clone(),
            created_at,
        }
    }
}

/// Rename audit record.
///
/// Written directly by forced renames; the one-rename-per-week limit lives
/// in the user-facing rename flow and never applies to records created
/// through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNameChangeRequest {
    /// The renamed account.
    pub user_id: UserId,
    /// Name held before the change.
    pub original_name: String,
    /// Name applied by the change.
    pub desired_name: String,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

impl UserNameChangeRequest {
    /// Create a rename audit record.
    pub fn new(
        user_id: UserId,
        original_name: impl Into<String>,
        desired_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            original_name: original_name.into(),
            desired_name: desired_name.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::net::Ipv4Addr;

    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn categories_map_to_database_strings() {
        assert_eq!(ModActionCategory::UserDelete.as_str(), "user_delete");
        assert_eq!(UserEventCategory::UserDeletion.as_str(), "user_deletion");
    }

    #[rstest]
    fn user_event_copies_request_metadata() {
        let context = RequestContext::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7)))
            .with_session_id("session-1")
            .with_user_agent("integration-suite/1.0");
        let now = Utc::now();

        let event =
            UserEvent::from_context(UserId::new(9), UserEventCategory::UserDeletion, &context, now);

        assert_eq!(event.user_id, UserId::new(9));
        assert_eq!(event.ip_addr, context.ip_addr);
        assert_eq!(event.session_id.as_deref(), Some("session-1"));
        assert_eq!(event.user_agent.as_deref(), Some("integration-suite/1.0"));
        assert_eq!(event.created_at, now);
    }
}
