//! User Entity
//!
//! A user account: login name, password credential, and the profile
//! fields the owner may edit.

use chrono::{DateTime, Utc};
use platform::password::PasswordHasher;

use crate::domain::value_object::{
    user_id::UserId,
    user_name::UserName,
    user_password::{PasswordCredential, RawPassword},
};
use crate::error::AuthResult;

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub user_id: UserId,
    /// Unique login name, case-sensitive
    pub user_name: UserName,
    /// Salt + hash pair
    pub credential: PasswordCredential,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// User not yet inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub credential: PasswordCredential,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Hash `password` with a fresh salt and build the insert record
    pub fn new(user_name: UserName, password: &RawPassword, hasher: &PasswordHasher) -> Self {
        Self {
            user_name,
            credential: PasswordCredential::derive(password, hasher),
            email: None,
            display_name: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the store-assigned id
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            user_name: self.user_name,
            credential: self.credential,
            email: self.email,
            display_name: self.display_name,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

impl User {
    /// Replace the credential with a fresh salt and hash of `password`
    pub fn set_password(&mut self, password: &RawPassword, hasher: &PasswordHasher) {
        self.credential = PasswordCredential::derive(password, hasher);
        self.updated_at = Utc::now();
    }

    /// Check `password` against the stored credential
    pub fn verify_password(&self, password: &RawPassword, hasher: &PasswordHasher) -> AuthResult<bool> {
        self.credential.verify(password, hasher)
    }

    /// Overwrite the editable profile fields
    ///
    /// Blank strings are stored as absent.
    pub fn update_profile(&mut self, email: Option<String>, display_name: Option<String>) {
        self.email = email.filter(|v| !v.trim().is_empty());
        self.display_name = display_name.filter(|v| !v.trim().is_empty());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(password: &str) -> User {
        let hasher = PasswordHasher::default();
        let raw = RawPassword::new(password.to_string()).unwrap();
        NewUser::new(UserName::new("admin").unwrap(), &raw, &hasher).into_user(UserId::from_i32(1))
    }

    #[test]
    fn test_verify_password() {
        let hasher = PasswordHasher::default();
        let user = user("password123");
        assert!(user.verify_password(&RawPassword::candidate("password123".into()), &hasher).unwrap());
        assert!(!user.verify_password(&RawPassword::candidate("wrong".into()), &hasher).unwrap());
    }

    #[test]
    fn test_set_password_rotates_salt_and_hash() {
        let hasher = PasswordHasher::default();
        let mut user = user("password123");
        let before = user.credential.clone();

        user.set_password(&RawPassword::new("password123".into()).unwrap(), &hasher);
        assert_ne!(before.salt(), user.credential.salt());
        assert_ne!(before.hash(), user.credential.hash());
        assert!(user.verify_password(&RawPassword::candidate("password123".into()), &hasher).unwrap());
    }

    #[test]
    fn test_update_profile() {
        let mut user = user("password123");
        user.update_profile(Some("a@example.com".into()), Some("  ".into()));
        assert_eq!(user.email.as_deref(), Some("a@example.com"));
        assert!(user.display_name.is_none());
        assert!(user.updated_at >= user.created_at);
    }
}
