//! CLI command implementations.

pub mod gifts;
pub mod password;
pub mod schema;

use invite_core::backend::{Gateway, GatewayConfig, GatewayError};

/// Connect to the backend configured in the environment (or `.env`).
fn gateway() -> Result<Gateway, GatewayError> {
    dotenvy::dotenv().ok();
    Gateway::new(&GatewayConfig::from_env()?)
}
