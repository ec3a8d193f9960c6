//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod profile;
pub mod seed;
pub mod sign_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::{AuthConfig, ConfigError};
pub use profile::{GetProfileUseCase, ProfileOutput, UpdateProfileInput, UpdateProfileUseCase};
pub use seed::seed_demo_user;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{Claims, Identity, TokenIssuer};
