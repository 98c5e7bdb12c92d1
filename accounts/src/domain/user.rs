//! User account record and privilege tiers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::DEFAULT_TIME_ZONE;
use super::credentials::Credential;

/// Stable user identifier.
///
/// # Examples
///
/// ```
/// use accounts::domain::UserId;
///
/// let id = UserId::new(42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Privilege tiers, ordered from least to most privileged.
///
/// Tier checks are at-least comparisons: an admin also counts as gold, and
/// the owner also counts as admin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum UserLevel {
    /// Ordinary account.
    #[default]
    Member,
    /// Paid, protected tier.
    Gold,
    /// Site administrator.
    Admin,
    /// The single highest-privilege account.
    Owner,
}

impl UserLevel {
    /// Returns the database string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Gold => "gold",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for UserLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application user record.
///
/// A mutable relational record; deactivation rewrites most of these fields
/// in place. The record itself is never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier, also the basis of the anonymised placeholder name.
    pub id: UserId,
    /// Unique account name.
    pub name: String,
    /// Contact address; emptied on deactivation.
    pub email: String,
    /// Privilege tier.
    pub level: UserLevel,
    /// Whether the account is currently banned.
    pub is_banned: bool,
    /// Account creation time; drives the third-party deletion age rule.
    pub created_at: DateTime<Utc>,
    /// Last successful login, unset on deactivation.
    pub last_logged_in_at: Option<DateTime<Utc>>,
    /// Last forum read marker, unset on deactivation.
    pub last_forum_read_at: Option<DateTime<Utc>>,
    /// Space-separated favourite tag list.
    pub favorite_tags: String,
    /// Space-separated blacklisted tag list.
    pub blacklisted_tags: String,
    /// Browsing preference toggle.
    pub show_deleted_children: bool,
    /// Preferred display time zone.
    pub time_zone: String,
    /// Stored password credential.
    pub credential: Credential,
}

impl User {
    /// Create a builder for constructing a user incrementally.
    pub fn builder(id: UserId, name: impl Into<String>, credential: Credential) -> UserBuilder {
        UserBuilder::new(id, name, credential)
    }

    /// Whether the account holds the gold tier or higher.
    #[must_use]
    pub fn is_gold(&self) -> bool {
        self.level >= UserLevel::Gold
    }

    /// Whether the account holds the admin tier or higher.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.level >= UserLevel::Admin
    }

    /// Whether the account is the site owner.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.level >= UserLevel::Owner
    }

    /// Verify a candidate password against the stored credential.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        self.credential.verify(password)
    }
}

/// Builder for constructing [`User`] records incrementally.
#[derive(Debug, Clone)]
pub struct UserBuilder {
    id: UserId,
    name: String,
    credential: Credential,
    email: String,
    level: UserLevel,
    is_banned: bool,
    created_at: Option<DateTime<Utc>>,
    last_logged_in_at: Option<DateTime<Utc>>,
    last_forum_read_at: Option<DateTime<Utc>>,
    favorite_tags: String,
    blacklisted_tags: String,
    show_deleted_children: bool,
    time_zone: String,
}

impl UserBuilder {
    /// Create a new builder with member-tier defaults.
    pub fn new(id: UserId, name: impl Into<String>, credential: Credential) -> Self {
        Self {
            id,
            name: name.into(),
            credential,
            email: String::new(),
            level: UserLevel::default(),
            is_banned: false,
            created_at: None,
            last_logged_in_at: None,
            last_forum_read_at: None,
            favorite_tags: String::new(),
            blacklisted_tags: String::new(),
            show_deleted_children: false,
            time_zone: DEFAULT_TIME_ZONE.to_owned(),
        }
    }

    /// Set the contact address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the privilege tier.
    pub fn level(mut self, level: UserLevel) -> Self {
        self.level = level;
        self
    }

    /// Mark the account as banned.
    pub fn banned(mut self, banned: bool) -> Self {
        self.is_banned = banned;
        self
    }

    /// Set the account creation time.
    pub fn created_at(mut self, ts: DateTime<Utc>) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Set the last successful login time.
    pub fn last_logged_in_at(mut self, ts: DateTime<Utc>) -> Self {
        self.last_logged_in_at = Some(ts);
        self
    }

    /// Set the last forum read marker.
    pub fn last_forum_read_at(mut self, ts: DateTime<Utc>) -> Self {
        self.last_forum_read_at = Some(ts);
        self
    }

    /// Set the favourite tag list.
    pub fn favorite_tags(mut self, tags: impl Into<String>) -> Self {
        self.favorite_tags = tags.into();
        self
    }

    /// Set the blacklisted tag list.
    pub fn blacklisted_tags(mut self, tags: impl Into<String>) -> Self {
        self.blacklisted_tags = tags.into();
        self
    }

    /// Set the deleted-children browsing toggle.
    pub fn show_deleted_children(mut self, show: bool) -> Self {
        self.show_deleted_children = show;
        self
    }

    /// Set the preferred display time zone.
    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Build the final [`User`] record.
    ///
    /// A missing creation time defaults to the current instant.
    pub fn build(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            level: self.level,
            is_banned: self.is_banned,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            last_logged_in_at: self.last_logged_in_at,
            last_forum_read_at: self.last_forum_read_at,
            favorite_tags: self.favorite_tags,
            blacklisted_tags: self.blacklisted_tags,
            show_deleted_children: self.show_deleted_children,
            time_zone: self.time_zone,
            credential: self.credential,
        }
    }
}
