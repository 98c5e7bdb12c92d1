//! Saved search records owned by a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// A stored search query, deleted wholesale when the owner deactivates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    /// Owning user.
    pub user_id: UserId,
    /// The saved query string.
    pub query: String,
    /// Optional labels grouping related searches.
    pub labels: Vec<String>,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

impl SavedSearch {
    /// Create an unlabelled saved search.
    pub fn new(user_id: UserId, query: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            query: query.into(),
            labels: Vec::new(),
            created_at,
        }
    }

    /// Attach labels to the search.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}
