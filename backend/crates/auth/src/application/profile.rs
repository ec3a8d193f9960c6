//! Profile Use Cases
//!
//! Read and edit the caller's own profile.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Profile as returned to its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOutput {
    pub user_id: i32,
    pub user_name: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl From<User> for ProfileOutput {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.value(),
            user_name: user.user_name.into_inner(),
            email: user.email,
            display_name: user.display_name,
        }
    }
}

/// Update profile input
pub struct UpdateProfileInput {
    pub user_name: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Get profile use case
pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_name: &str) -> AuthResult<ProfileOutput> {
        self.user_repo
            .find_by_user_name(user_name)
            .await?
            .map(ProfileOutput::from)
            .ok_or(AuthError::UserNotFound)
    }
}

/// Update profile use case
pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Both fields are overwritten; an absent field clears the value
    pub async fn execute(&self, input: UpdateProfileInput) -> AuthResult<()> {
        let mut user = self
            .user_repo
            .find_by_user_name(&input.user_name)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.update_profile(input.email, input.display_name);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::sign_up::{SignUpInput, SignUpUseCase};
    use crate::infra::memory::MemoryUserRepository;

    async fn repo_with_admin() -> Arc<MemoryUserRepository> {
        let repo = Arc::new(MemoryUserRepository::new());
        SignUpUseCase::new(repo.clone(), Arc::new(AuthConfig::development()))
            .execute(SignUpInput {
                user_name: "admin".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_get_profile() {
        let repo = repo_with_admin().await;
        let profile = GetProfileUseCase::new(repo).execute("admin").await.unwrap();
        assert_eq!(profile.user_name, "admin");
        assert!(profile.email.is_none());
        assert!(profile.display_name.is_none());
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let repo = repo_with_admin().await;
        UpdateProfileUseCase::new(repo.clone())
            .execute(UpdateProfileInput {
                user_name: "admin".to_string(),
                email: Some("admin@example.com".to_string()),
                display_name: Some("Administrator".to_string()),
            })
            .await
            .unwrap();

        let profile = GetProfileUseCase::new(repo).execute("admin").await.unwrap();
        assert_eq!(profile.email.as_deref(), Some("admin@example.com"));
        assert_eq!(profile.display_name.as_deref(), Some("Administrator"));
    }

    #[tokio::test]
    async fn test_missing_user() {
        let repo = repo_with_admin().await;
        let err = GetProfileUseCase::new(repo).execute("ghost").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
