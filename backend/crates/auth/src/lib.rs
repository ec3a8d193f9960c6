//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Config, token issuer, use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Login with user name + password, answered with an HS256 bearer token
//! - Account registration
//! - Own-profile read/update and password change behind bearer auth
//! - Demo user seeding on an empty store
//!
//! ## Security Model
//! - Passwords hashed with PBKDF2-HMAC-SHA256 and a per-user random salt
//! - Constant-time hash comparison
//! - Unknown user and wrong password are indistinguishable, in body and timing
//! - Tokens are stateless: no refresh, no revocation

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use application::seed::seed_demo_user;
pub use application::token::{Identity, TokenIssuer};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryUserRepository, postgres::PgUserRepository};
pub use presentation::router::api_router;
