//! Stored credentials and the replacement tokens used to invalidate them.
//!
//! Credentials are Argon2id hashes in PHC string format. Plaintext only
//! ever appears wrapped in [`Zeroizing`] so it is wiped on drop.

use argon2::password_hash::{PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core};
use argon2::{Argon2, PasswordHash};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Bytes of random material in a scramble token; hex-encodes to 32 chars.
const SCRAMBLE_BYTES: usize = 16;

/// Errors raised while deriving a stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The hashing backend rejected the input.
    #[error("credential hashing failed: {message}")]
    Hash { message: String },
}

impl CredentialError {
    /// Helper for hashing backend failures.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// A stored password credential.
///
/// ## Invariants
/// - Always holds a PHC-formatted Argon2id hash produced by
///   [`Credential::from_password`]; the plaintext is never retained.
///
/// # Examples
///
/// ```
/// use accounts::domain::Credential;
///
/// let credential = Credential::from_password("correct horse").expect("hashing succeeds");
/// assert!(credential.verify("correct horse"));
/// assert!(!credential.verify("wrong"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Hash a plaintext password into a stored credential.
    pub fn from_password(password: &str) -> Result<Self, CredentialError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| CredentialError::hash(err.to_string()))
    }

    /// Verify a candidate password against the stored hash.
    ///
    /// Stored material that fails to parse never verifies.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        PasswordHash::new(&self.0)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Borrow the PHC-formatted hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Generate replacement password material for credential invalidation.
///
/// Returns 32 lowercase hexadecimal characters drawn from the operating
/// system CSPRNG. Callers hash the token and drop it; no record of the
/// plaintext survives, so the account cannot be logged into afterwards.
#[must_use]
pub fn scramble_token() -> Zeroizing<String> {
    let mut bytes = [0_u8; SCRAMBLE_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    Zeroizing::new(hex::encode(bytes))
}
