//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
///
/// There is one shared admin password, so the identity is just the moment
/// the session was authenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub logged_in_at: DateTime<Utc>,
}

/// Session keys for admin data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the one-shot notification shown on the next page.
    pub const FLASH: &str = "flash";
}
