//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup,
//! validated, then shared read-only behind an `Arc`.

use std::time::Duration;

use platform::crypto::{random_bytes, to_base64};
use platform::password::{DEFAULT_ITERATIONS, MIN_ITERATIONS, PasswordHasher};
use thiserror::Error;

/// Minimum signing secret length in bytes (HS256 key size)
pub const MIN_SECRET_LEN: usize = 32;

pub const DEFAULT_ISSUER: &str = "dendo-api";
pub const DEFAULT_AUDIENCE: &str = "dendo-client";
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 8;
pub const DEFAULT_DEMO_USERNAME: &str = "admin";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("JWT_SECRET must be at least {min} bytes (got {actual})")]
    SecretTooShort { min: usize, actual: usize },

    #[error("PASSWORD_KDF_ITERATIONS must be at least {min} (got {actual})")]
    IterationsTooLow { min: u32, actual: u32 },
}

/// Demo account created on an empty store
#[derive(Clone)]
pub struct DemoUser {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for DemoUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret (used as its UTF-8 bytes)
    pub jwt_secret: String,
    /// `iss` claim written and required
    pub jwt_issuer: String,
    /// `aud` claim written and required
    pub jwt_audience: String,
    /// Token lifetime from issue time
    pub token_ttl: Duration,
    /// PBKDF2 iteration count
    pub kdf_iterations: u32,
    /// Seeded when the user store is empty
    pub demo_user: Option<DemoUser>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("token_ttl", &self.token_ttl)
            .field("kdf_iterations", &self.kdf_iterations)
            .field("demo_user", &self.demo_user)
            .finish()
    }
}

impl AuthConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = non_empty("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let jwt_issuer = non_empty("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string());
        let jwt_audience =
            non_empty("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());

        let ttl_hours = match non_empty("JWT_TTL_HOURS") {
            Some(raw) => parse_number::<u64>("JWT_TTL_HOURS", &raw)?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        let kdf_iterations = match non_empty("PASSWORD_KDF_ITERATIONS") {
            Some(raw) => parse_number::<u32>("PASSWORD_KDF_ITERATIONS", &raw)?,
            None => DEFAULT_ITERATIONS,
        };

        let demo_user = non_empty("DEMO_USER_PASSWORD").map(|password| DemoUser {
            username: non_empty("DEMO_USER_USERNAME")
                .unwrap_or_else(|| DEFAULT_DEMO_USERNAME.to_string()),
            password,
        });

        Ok(Self {
            jwt_secret,
            jwt_issuer,
            jwt_audience,
            token_ttl: Duration::from_secs(ttl_hours.saturating_mul(3600)),
            kdf_iterations,
            demo_user,
        })
    }

    /// Check the invariants the token issuer and hasher rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LEN,
                actual: self.jwt_secret.len(),
            });
        }
        if self.jwt_issuer.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "JWT_ISSUER",
                reason: "must not be empty".to_string(),
            });
        }
        if self.jwt_audience.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "JWT_AUDIENCE",
                reason: "must not be empty".to_string(),
            });
        }
        if self.token_ttl.is_zero() {
            return Err(ConfigError::Invalid {
                name: "JWT_TTL_HOURS",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.kdf_iterations < MIN_ITERATIONS {
            return Err(ConfigError::IterationsTooLow {
                min: MIN_ITERATIONS,
                actual: self.kdf_iterations,
            });
        }
        Ok(())
    }

    /// Create config with a random signing secret (for development and tests)
    pub fn development() -> Self {
        Self {
            jwt_secret: to_base64(&random_bytes(48)),
            jwt_issuer: DEFAULT_ISSUER.to_string(),
            jwt_audience: DEFAULT_AUDIENCE.to_string(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_HOURS * 3600),
            kdf_iterations: DEFAULT_ITERATIONS,
            demo_user: None,
        }
    }

    /// Password hasher at the configured iteration count
    pub fn hasher(&self) -> PasswordHasher {
        PasswordHasher::new(self.kdf_iterations)
    }

    /// Token TTL in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
        name,
        reason: format!("'{raw}' is not a valid number"),
    })
}
