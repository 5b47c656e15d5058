//! Admin password hashing.
//!
//! # Usage
//!
//! ```bash
//! read -rs PW && printf '%s' "$PW" | invite-cli password hash
//! ```

use std::io::Read;

use invite_admin::services::{AdminAuthError, hash_password};
use thiserror::Error;

/// Errors that can occur while hashing.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("could not read password from stdin: {0}")]
    Stdin(#[from] std::io::Error),

    #[error("password is empty")]
    Empty,

    #[error(transparent)]
    Hash(#[from] AdminAuthError),
}

/// Read a password from stdin and print its Argon2 PHC string.
///
/// A single trailing newline is stripped so `echo` works.
///
/// # Errors
///
/// Returns an error if stdin is unreadable, empty, or hashing fails.
pub fn hash() -> Result<(), PasswordError> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let password = strip_newline(&input);
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }

    let phc = hash_password(password)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{phc}");
    }
    tracing::info!("Set ADMIN_PASSWORD_HASH to the line above");
    Ok(())
}

fn strip_newline(input: &str) -> &str {
    input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .unwrap_or(input)
}
