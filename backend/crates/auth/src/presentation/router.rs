//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Public routes, mounted at `/api/auth`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/register", post(handlers::register::<R>))
        .with_state(state)
}

/// Bearer-protected routes, mounted at `/api/user`
pub fn user_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/me",
            get(handlers::get_me::<R>).put(handlers::update_me::<R>),
        )
        .route("/me/password", put(handlers::change_password::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_bearer,
        ))
        .with_state(state)
}

/// Both routers under their `/api` prefixes
pub fn api_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config);

    Router::new()
        .nest("/api/auth", auth_router(state.clone()))
        .nest("/api/user", user_router(state))
}
