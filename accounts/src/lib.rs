//! Account lifecycle domain library.
//!
//! Implements the account deactivation workflow: rule-checked teardown of a
//! user account that scrubs personal settings, removes favorites and saved
//! searches, renames the account to an anonymised placeholder, invalidates
//! the stored credential, and records an audit trail. Storage, the job
//! runner, and the audit stores sit behind ports in [`domain::ports`] so
//! adapters can be swapped without touching the rules.

pub mod domain;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use domain::{DeactivationRequest, UserDeactivationService};
