//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (CSPRNG bytes, Base64, constant-time comparison)
//! - Password hashing (PBKDF2-HMAC-SHA256, salted, fixed-time verification)
//! - Bearer credential parsing for the `Authorization` header

pub mod bearer;
pub mod crypto;
pub mod password;
