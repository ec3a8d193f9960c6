//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and return it with its assigned id
    ///
    /// Fails with `AuthError::UserNameTaken` if the name is already used.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by user name (exact, case-sensitive)
    async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Whether any user exists
    async fn any(&self) -> AuthResult<bool>;

    /// Persist credential and profile changes
    async fn update(&self, user: &User) -> AuthResult<()>;
}
