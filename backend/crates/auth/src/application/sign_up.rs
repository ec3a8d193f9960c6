//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutput {
    pub user_id: i32,
    pub user_name: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let user_name = UserName::new(input.user_name)?;

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let new_user = NewUser::new(user_name, &raw_password, &self.config.hasher());

        // The store still enforces uniqueness if a concurrent sign-up wins
        let user = self.user_repo.create(&new_user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id.value(),
            user_name: user.user_name.into_inner(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryUserRepository;

    fn use_case() -> SignUpUseCase<MemoryUserRepository> {
        SignUpUseCase::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(AuthConfig::development()),
        )
    }

    fn input(user_name: &str, password: &str) -> SignUpInput {
        SignUpInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_assigns_ids() {
        let sign_up = use_case();
        let first = sign_up.execute(input("alice", "password123")).await.unwrap();
        let second = sign_up.execute(input("bob", "password123")).await.unwrap();
        assert_eq!(first.user_name, "alice");
        assert_ne!(first.user_id, second.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_user_name() {
        let sign_up = use_case();
        sign_up.execute(input("alice", "password123")).await.unwrap();
        let err = sign_up.execute(input("alice", "other-password")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));

        // Differs only by case, so it is a different user
        assert!(sign_up.execute(input("Alice", "password123")).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let sign_up = use_case();
        let err = sign_up.execute(input("", "password123")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNameInvalid(_)));

        let err = sign_up.execute(input("alice", " ")).await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordValidation(_)));
    }
}
