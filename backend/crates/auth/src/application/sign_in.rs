//! Sign In Use Case
//!
//! Checks a user name and password and mints a bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::RawPassword;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed bearer token
    pub token: String,
}

impl std::fmt::Debug for SignInOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInOutput")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    /// Unknown user and wrong password both end in `InvalidCredentials`
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let hasher = self.config.hasher();
        let candidate = RawPassword::candidate(input.password);

        let Some(user) = self.user_repo.find_by_user_name(&input.user_name).await? else {
            // Same PBKDF2 cost as a real check
            hasher.verify_dummy(candidate.as_clear_text());
            return Err(AuthError::InvalidCredentials);
        };

        if !user.verify_password(&candidate, &hasher)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.generate(user.user_name.as_str())?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { token })
    }
}
