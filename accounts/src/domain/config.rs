//! Tunables for the account deactivation workflow.
//!
//! The original deployment hard-coded these values inline; they are
//! externalised here so operators can adjust them without touching the
//! service rules.

use chrono::Months;

/// Time zone written back to accounts when their settings are scrubbed.
pub const DEFAULT_TIME_ZONE: &str = "Eastern Time (US & Canada)";

/// Configuration consumed by the deactivation service.
///
/// # Examples
///
/// ```
/// use accounts::domain::DeactivationConfig;
///
/// let config = DeactivationConfig::default();
/// assert_eq!(config.default_time_zone, "Eastern Time (US & Canada)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeactivationConfig {
    /// Time zone assigned to deactivated accounts.
    pub default_time_zone: String,
    /// Accounts younger than this window cannot be deactivated by another
    /// user. Self-deletion is not subject to the window.
    pub protected_account_age: Months,
}

impl Default for DeactivationConfig {
    fn default() -> Self {
        Self {
            default_time_zone: DEFAULT_TIME_ZONE.to_owned(),
            protected_account_age: Months::new(6),
        }
    }
}
