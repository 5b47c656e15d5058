//! Admin authentication service.
//!
//! The dashboard has a single shared password. Only its Argon2 hash is
//! configured; the plain text never leaves the login request.

mod error;

pub use error::AdminAuthError;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;

use crate::config::PasswordHashString;
use crate::models::CurrentAdmin;

/// Hash a password into a PHC string suitable for `ADMIN_PASSWORD_HASH`.
///
/// # Errors
///
/// Returns `AdminAuthError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AdminAuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check `password` against a PHC string.
///
/// # Errors
///
/// Returns `AdminAuthError::InvalidPassword` on mismatch, or
/// `AdminAuthError::Hash` if `phc` cannot be parsed.
pub fn verify_password(password: &str, phc: &str) -> Result<(), AdminAuthError> {
    let parsed = PasswordHash::new(phc)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|e| match e {
            argon2::password_hash::Error::Password => AdminAuthError::InvalidPassword,
            other => AdminAuthError::Hash(other),
        })
}

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    password_hash: &'a PasswordHashString,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(password_hash: &'a PasswordHashString) -> Self {
        Self { password_hash }
    }

    /// Verify the submitted password and build the session identity.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidPassword` if the password is wrong.
    pub fn login(&self, password: &str) -> Result<CurrentAdmin, AdminAuthError> {
        verify_password(password, self.password_hash.expose())?;
        Ok(CurrentAdmin {
            logged_in_at: Utc::now(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let phc = hash_password("festa-do-henry").unwrap();
        assert!(phc.starts_with("$argon2"));
        assert!(verify_password("festa-do-henry", &phc).is_ok());
        assert!(matches!(
            verify_password("wrong", &phc),
            Err(AdminAuthError::InvalidPassword)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_not_a_password_mismatch() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AdminAuthError::Hash(_))
        ));
    }

    #[test]
    fn test_service_login() {
        let hash = PasswordHashString::parse(&hash_password("segredo").unwrap()).unwrap();
        let service = AdminAuthService::new(&hash);
        assert!(service.login("segredo").is_ok());
        assert!(matches!(
            service.login("Segredo"),
            Err(AdminAuthError::InvalidPassword)
        ));
    }
}
