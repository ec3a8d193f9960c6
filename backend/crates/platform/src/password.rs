//! Password Hashing and Verification
//!
//! Salted PBKDF2-HMAC-SHA256 with:
//! - 16-byte random salt, regenerated on every hash
//! - 32-byte derived key
//! - 100,000 iterations by default (configurable, never lower)
//! - Constant-time comparison on verify
//! - Zeroization of clear text and derived key material
//!
//! Salt and hash are stored as two standard Base64 strings. A stored pair
//! that cannot be decoded is reported as [`PasswordHashError::CorruptCredential`],
//! never as a failed match.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{constant_time_eq, from_base64, random_bytes, to_base64};

// ============================================================================
// Constants
// ============================================================================

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes
pub const HASH_LEN: usize = 32;

/// Default PBKDF2 iteration count
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count accepted by configuration validation
pub const MIN_ITERATIONS: u32 = 100_000;

/// Maximum password length in characters. Bounds the KDF input.
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors (new passwords only)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Control characters other than tab and newline
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// Stored salt or hash is not decodable or has the wrong length
    #[error("Stored password credential is corrupt: {0}")]
    CorruptCredential(&'static str),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory on drop
///
/// Not `Clone`, and `Debug` is redacted.
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let new_password = ClearTextPassword::new("correct horse".to_string()).unwrap();
/// let attempt = ClearTextPassword::candidate("anything goes".to_string());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate a password that is about to be stored
    ///
    /// Rejects empty or whitespace-only input, more than
    /// [`MAX_PASSWORD_LENGTH`] characters, and control characters other
    /// than tab and newline. Everything else is accepted as-is; no
    /// normalization is applied so the bytes hashed are the bytes typed.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        // Wrap first so every early return still zeroizes the input
        let password = Self(raw);

        if password.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = password.0.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if password
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    /// Wrap a login attempt without policy checks
    ///
    /// A candidate that would fail the policy simply won't match any
    /// stored hash.
    pub fn candidate(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Salt and derived key, both Base64 encoded, as they are stored
///
/// The two halves only ever travel together so one can never be replaced
/// without the other.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    salt: String,
    hash: String,
}

impl HashedPassword {
    /// Rebuild from the stored columns
    ///
    /// No decoding happens here. A corrupt pair is detected by
    /// [`PasswordHasher::verify`] so that loading a row never fails.
    pub fn from_stored(salt: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            hash: hash.into(),
        }
    }

    pub fn salt_base64(&self) -> &str {
        &self.salt
    }

    pub fn hash_base64(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("salt", &"[SALT]")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// PBKDF2-HMAC-SHA256 with a fixed iteration count
///
/// The iteration count is not stored alongside the hash, so the same
/// hasher configuration must be used for hashing and verification.
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, PasswordHasher};
///
/// let hasher = PasswordHasher::default();
/// let password = ClearTextPassword::new("password123".to_string()).unwrap();
/// let stored = hasher.hash(&password);
///
/// let attempt = ClearTextPassword::candidate("password123".to_string());
/// assert!(hasher.verify(&attempt, &stored).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl PasswordHasher {
    /// Iteration count is taken as-is; configuration validation enforces
    /// [`MIN_ITERATIONS`].
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash with a freshly generated salt
    pub fn hash(&self, password: &ClearTextPassword) -> HashedPassword {
        let salt = random_bytes(SALT_LEN);
        let key = self.derive(password.as_bytes(), &salt);

        HashedPassword {
            salt: to_base64(&salt),
            hash: to_base64(key.as_slice()),
        }
    }

    /// Re-derive with the stored salt and compare in constant time
    ///
    /// ## Returns
    /// - `Ok(true)` on match, `Ok(false)` on mismatch
    /// - `Err(CorruptCredential)` if the stored pair cannot be used
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        stored: &HashedPassword,
    ) -> Result<bool, PasswordHashError> {
        let salt = from_base64(&stored.salt)
            .map_err(|_| PasswordHashError::CorruptCredential("salt is not valid base64"))?;
        if salt.len() != SALT_LEN {
            return Err(PasswordHashError::CorruptCredential("salt has wrong length"));
        }

        let expected = from_base64(&stored.hash)
            .map_err(|_| PasswordHashError::CorruptCredential("hash is not valid base64"))?;
        if expected.len() != HASH_LEN {
            return Err(PasswordHashError::CorruptCredential("hash has wrong length"));
        }

        let actual = self.derive(password.as_bytes(), &salt);
        Ok(constant_time_eq(actual.as_slice(), &expected))
    }

    /// Spend the same work as [`verify`](Self::verify) without a stored hash
    ///
    /// Used when the account does not exist so response time does not
    /// reveal which user names are registered.
    pub fn verify_dummy(&self, password: &ClearTextPassword) {
        let _ = self.derive(password.as_bytes(), &[0u8; SALT_LEN]);
    }

    fn derive(&self, password: &[u8], salt: &[u8]) -> Zeroizing<[u8; HASH_LEN]> {
        let mut key = Zeroizing::new([0u8; HASH_LEN]);
        pbkdf2_hmac::<Sha256>(password, salt, self.iterations, key.as_mut_slice());
        key
    }
}

// ============================================================================
// Tests
// ============================================================================
