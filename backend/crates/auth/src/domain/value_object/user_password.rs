//! User Password Value Object
//!
//! Domain wrappers over `platform::password`. A stored credential is a
//! salt/hash pair and is only ever replaced as a whole.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{PasswordCredential, RawPassword};
//! use platform::password::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let raw = RawPassword::new("password123".to_string()).unwrap();
//! let credential = PasswordCredential::derive(&raw, &hasher);
//!
//! let attempt = RawPassword::candidate("password123".to_string());
//! assert!(credential.verify(&attempt, &hasher).unwrap());
//! ```

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a password that is about to be stored
    ///
    /// ## Errors
    /// `AuthError::PasswordValidation` with a user-facing message
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw).map(Self).map_err(|e| {
            let message = match e {
                PasswordPolicyError::EmptyOrWhitespace => "Password cannot be empty".to_string(),
                other => other.to_string(),
            };
            AuthError::PasswordValidation(message)
        })
    }

    /// Wrap a login or confirmation attempt, no policy applied
    pub fn candidate(raw: String) -> Self {
        Self(ClearTextPassword::candidate(raw))
    }

    pub(crate) fn as_clear_text(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

// ============================================================================
// Password Credential (Stored)
// ============================================================================

/// Stored salt + hash pair, both base64
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential(HashedPassword);

impl PasswordCredential {
    /// Derive a new credential with a fresh salt
    pub fn derive(raw: &RawPassword, hasher: &PasswordHasher) -> Self {
        Self(hasher.hash(raw.as_clear_text()))
    }

    /// Rebuild from stored columns
    pub fn from_stored(salt: impl Into<String>, hash: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(salt, hash))
    }

    /// Constant-time check of `raw` against this credential
    ///
    /// ## Errors
    /// `AuthError::CredentialCorrupted` when the stored pair is unusable.
    /// This is never folded into a `false`.
    pub fn verify(&self, raw: &RawPassword, hasher: &PasswordHasher) -> AuthResult<bool> {
        Ok(hasher.verify(raw.as_clear_text(), &self.0)?)
    }

    pub fn salt(&self) -> &str {
        self.0.salt_base64()
    }

    pub fn hash(&self) -> &str {
        self.0.hash_base64()
    }
}

impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordCredential([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        let err = RawPassword::new("   ".to_string()).unwrap_err();
        assert!(matches!(err, AuthError::PasswordValidation(ref m) if m == "Password cannot be empty"));
    }

    #[test]
    fn test_new_rejects_too_long() {
        let err = RawPassword::new("a".repeat(129)).unwrap_err();
        assert!(matches!(err, AuthError::PasswordValidation(_)));
    }

    #[test]
    fn test_derive_and_verify() {
        let hasher = PasswordHasher::default();
        let raw = RawPassword::new("password123".to_string()).unwrap();
        let credential = PasswordCredential::derive(&raw, &hasher);

        assert!(
            credential
                .verify(&RawPassword::candidate("password123".to_string()), &hasher)
                .unwrap()
        );
        assert!(
            !credential
                .verify(&RawPassword::candidate("wrong".to_string()), &hasher)
                .unwrap()
        );
    }

    #[test]
    fn test_corrupt_credential_is_an_error() {
        let hasher = PasswordHasher::default();
        let credential = PasswordCredential::from_stored("!!!", "!!!");
        let err = credential
            .verify(&RawPassword::candidate("password123".to_string()), &hasher)
            .unwrap_err();
        assert!(matches!(err, AuthError::CredentialCorrupted(_)));
    }

    #[test]
    fn test_debug_is_redacted() {
        let hasher = PasswordHasher::default();
        let raw = RawPassword::new("password123".to_string()).unwrap();
        let credential = PasswordCredential::derive(&raw, &hasher);
        assert!(!format!("{:?}", raw).contains("password123"));
        assert!(!format!("{:?}", credential).contains(credential.hash()));
    }
}
