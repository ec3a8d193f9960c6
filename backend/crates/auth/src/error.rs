//! Auth Error Types
//!
//! Auth-specific error variants that render through the unified
//! `kernel::error::AppError` response shape.

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::bearer::{BearerError, WWW_AUTHENTICATE_BEARER};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user name or wrong password. The two are never told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer credential on a protected request
    #[error("Authentication required")]
    TokenMissing,

    /// Bad signature, wrong issuer/audience, expired, or malformed token
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// Password change with a wrong current password
    #[error("Current password is incorrect.")]
    CurrentPasswordIncorrect,

    /// New password rejected by policy
    #[error("{0}")]
    PasswordValidation(String),

    /// User name rejected at registration
    #[error("{0}")]
    UserNameInvalid(String),

    /// Body missing, not JSON, or not the expected shape
    #[error("Invalid request: {0}")]
    InvalidRequestBody(String),

    /// User name already registered
    #[error("User name already exists")]
    UserNameTaken,

    /// Authenticated subject no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Stored salt/hash could not be decoded
    #[error("Stored credential is corrupt: {0}")]
    CredentialCorrupted(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::TokenMissing | AuthError::TokenInvalid => {
                ErrorKind::Unauthorized
            }
            AuthError::CurrentPasswordIncorrect
            | AuthError::PasswordValidation(_)
            | AuthError::UserNameInvalid(_)
            | AuthError::InvalidRequestBody(_) => ErrorKind::BadRequest,
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::CredentialCorrupted(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs; clients get a generic message.
    /// Database errors are classified by the kernel conversion, so an
    /// exhausted pool answers 503 rather than 500.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            AuthError::TokenMissing | AuthError::TokenInvalid => {
                AppError::new(ErrorKind::Unauthorized, self.to_string())
                    .with_action("Sign in and send the token as an Authorization: Bearer header")
            }
            other => match other.kind() {
                kind if kind.is_server_error() => AppError::internal("Internal server error"),
                kind => AppError::new(kind, other.to_string()),
            },
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::CredentialCorrupted(reason) => {
                tracing::error!(reason, "Stored password credential is corrupt");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = matches!(self, AuthError::TokenMissing | AuthError::TokenInvalid);
        let mut response = self.into_app_error().into_response();
        if challenge {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(WWW_AUTHENTICATE_BEARER),
            );
        }
        response
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidRequestBody(rejection.body_text())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::CorruptCredential(reason) => AuthError::CredentialCorrupted(reason),
        }
    }
}

impl From<BearerError> for AuthError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::MissingHeader => AuthError::TokenMissing,
            BearerError::InvalidScheme | BearerError::EmptyToken => AuthError::TokenInvalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::TokenInvalid.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::CurrentPasswordIncorrect.kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::UserNameTaken.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            AuthError::CredentialCorrupted("salt").kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = AuthError::CredentialCorrupted("hash is not valid base64");
        let app_err = err.into_app_error();
        assert_eq!(app_err.status_code(), 500);
        assert!(!app_err.message().contains("base64"));
    }

    #[test]
    fn test_current_password_message() {
        let app_err = AuthError::CurrentPasswordIncorrect.into_app_error();
        assert_eq!(app_err.message(), "Current password is incorrect.");
    }

    #[test]
    fn test_token_errors_carry_bearer_challenge() {
        let response = AuthError::TokenMissing.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let response = AuthError::InvalidCredentials.into_response();
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn test_database_errors_use_kernel_classification() {
        let app_err = AuthError::Database(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);
        assert!(!app_err.message().contains("PoolTimedOut"));

        let app_err = AuthError::Database(sqlx::Error::Protocol("bad packet".into())).into_app_error();
        assert_eq!(app_err.status_code(), 500);
        assert!(!app_err.message().contains("bad packet"));
    }

    #[test]
    fn test_token_errors_carry_action() {
        let app_err = AuthError::TokenMissing.into_app_error();
        assert_eq!(app_err.status_code(), 401);
        assert!(app_err.action().is_some());
        assert!(AuthError::InvalidCredentials.into_app_error().action().is_none());
    }

    #[test]
    fn test_invalid_body_is_bad_request() {
        let app_err = AuthError::InvalidRequestBody("missing field `password`".into()).into_app_error();
        assert_eq!(app_err.status_code(), 400);
        assert!(app_err.message().starts_with("Invalid request: "));
    }

    #[test]
    fn test_corrupt_credential_conversion() {
        let err: AuthError = PasswordHashError::CorruptCredential("salt has wrong length").into();
        assert!(matches!(err, AuthError::CredentialCorrupted("salt has wrong length")));
    }
}
