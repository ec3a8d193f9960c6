//! Shared Kernel
//!
//! Vocabulary that every backend crate agrees on:
//! - The unified error type ([`error::app_error::AppError`]) and its HTTP classification
//! - Typed integer identifiers for persisted entities
//!
//! Keep this crate small. Anything domain specific belongs in the domain crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
