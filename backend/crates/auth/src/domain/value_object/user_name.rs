//! User Name Value Object
//!
//! The login key and the token subject. Compared byte for byte: no case
//! folding and no normalization, so `Admin` and `admin` are different users.

use std::fmt;

use crate::error::AuthError;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// Empty or whitespace only
    Empty,

    /// Longer than USER_NAME_MAX_LENGTH
    TooLong { length: usize, max: usize },

    /// Leading or trailing whitespace
    SurroundingWhitespace,

    /// Control characters anywhere
    ControlCharacter,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::SurroundingWhitespace => {
                write!(f, "User name cannot start or end with whitespace")
            }
            Self::ControlCharacter => write!(f, "User name contains invalid control characters"),
        }
    }
}

impl std::error::Error for UserNameError {}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::UserNameInvalid(err.to_string())
    }
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Validate a user name for registration
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(UserNameError::Empty);
        }
        if raw.trim() != raw {
            return Err(UserNameError::SurroundingWhitespace);
        }

        let length = raw.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if raw.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }

        Ok(Self(raw))
    }

    /// Wrap a value read back from the store
    pub fn from_trusted(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(UserName::new("admin").unwrap().as_str(), "admin");
        assert_eq!(UserName::new("Jane Doe").unwrap().as_str(), "Jane Doe");
        assert_eq!(UserName::new("ユーザー").unwrap().as_str(), "ユーザー");
    }

    #[test]
    fn test_case_is_preserved() {
        let upper = UserName::new("Admin").unwrap();
        let lower = UserName::new("admin").unwrap();
        assert_ne!(upper, lower);
        assert_eq!(upper.as_str(), "Admin");
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(UserName::new("").unwrap_err(), UserNameError::Empty);
        assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
    }

    #[test]
    fn test_surrounding_whitespace_rejected() {
        assert_eq!(
            UserName::new(" admin").unwrap_err(),
            UserNameError::SurroundingWhitespace
        );
    }

    #[test]
    fn test_too_long_rejected() {
        let name = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            UserName::new(name).unwrap_err(),
            UserNameError::TooLong { length: 65, max: 64 }
        ));
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(
            UserName::new("ad\u{0}min").unwrap_err(),
            UserNameError::ControlCharacter
        );
    }

    #[test]
    fn test_maps_to_bad_request() {
        let err: AuthError = UserNameError::Empty.into();
        assert!(matches!(err, AuthError::UserNameInvalid(ref msg) if msg == "User name cannot be empty"));
    }
}
