//! Demo User Seeding
//!
//! Creates the configured demo account on first start.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Create the demo user if the store has no users at all
///
/// Returns whether a user was created. Does nothing when no demo password
/// is configured.
pub async fn seed_demo_user<U>(user_repo: Arc<U>, config: Arc<AuthConfig>) -> AuthResult<bool>
where
    U: UserRepository,
{
    let Some(demo) = config.demo_user.clone() else {
        tracing::debug!("No demo user configured");
        return Ok(false);
    };

    if user_repo.any().await? {
        return Ok(false);
    }

    let output = SignUpUseCase::new(user_repo, config)
        .execute(SignUpInput {
            user_name: demo.username,
            password: demo.password,
        })
        .await?;

    tracing::info!(user_id = output.user_id, user_name = %output.user_name, "Demo user seeded");

    Ok(true)
}
