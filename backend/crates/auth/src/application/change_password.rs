//! Change Password Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::RawPassword;
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    /// Subject of the caller's token
    pub user_name: String,
    pub current_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: ChangePasswordInput) -> AuthResult<()> {
        let mut user = self
            .user_repo
            .find_by_user_name(&input.user_name)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let hasher = self.config.hasher();
        let current = RawPassword::candidate(input.current_password);
        if !user.verify_password(&current, &hasher)? {
            return Err(AuthError::CurrentPasswordIncorrect);
        }

        let new_password = RawPassword::new(input.new_password)?;
        user.set_password(&new_password, &hasher);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(())
    }
}
