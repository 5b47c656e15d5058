//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Password verification against the configured Argon2 hash

pub mod auth;

pub use auth::{AdminAuthError, AdminAuthService, hash_password, verify_password};
