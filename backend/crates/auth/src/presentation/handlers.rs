//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, GetProfileUseCase, SignInInput, SignInUseCase,
    SignUpInput, SignUpUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest,
    RegisterResponse, UpdateProfileRequest,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        let tokens = Arc::new(TokenIssuer::new(&config));
        Self {
            repo,
            config,
            tokens,
        }
    }
}

// Manual impl: only the Arcs are cloned, `R` need not be `Clone`
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Login / Register
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
    }))
}

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: output.user_id,
            username: output.user_name,
        }),
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/user/me
pub async fn get_me<R>(
    State(state): State<AuthAppState<R>>,
    user: AuthenticatedUser,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let profile = GetProfileUseCase::new(state.repo.clone())
        .execute(&user.username)
        .await?;

    Ok(Json(profile.into()))
}

/// PUT /api/user/me
pub async fn update_me<R>(
    State(state): State<AuthAppState<R>>,
    user: AuthenticatedUser,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    UpdateProfileUseCase::new(state.repo.clone())
        .execute(UpdateProfileInput {
            user_name: user.username,
            email: req.email,
            display_name: req.display_name,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/user/me/password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    user: AuthenticatedUser,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    ChangePasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute(ChangePasswordInput {
            user_name: user.username,
            current_password: req.current_password,
            new_password: req.new_password,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
