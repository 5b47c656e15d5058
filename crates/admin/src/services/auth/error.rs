//! Admin authentication error types.

use thiserror::Error;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// The submitted password does not match the configured hash.
    #[error("invalid password")]
    InvalidPassword,

    /// Hashing or hash parsing failed.
    #[error("password hash error: {0}")]
    Hash(#[from] argon2::password_hash::Error),
}
