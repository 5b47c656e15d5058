//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_BASE_URL` - Public URL for the site
//! - `BACKEND_URL` (or `SUPABASE_URL`) - Hosted backend project URL
//! - `BACKEND_ANON_KEY` (or `SUPABASE_ANON_KEY`) - Backend anon API key
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_STATIC_DIR` - Static assets directory (default: crates/site/static)
//! - `EVENT_*` - Event detail overrides (see [`EventDetails::from_lookup`])
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use invite_core::EventDetails;
use invite_core::backend::{GatewayConfig, GatewayError};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Backend configuration: {0}")]
    Backend(#[from] GatewayError),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Hosted backend connection
    pub backend: GatewayConfig,
    /// What the invitation says
    pub event: EventDetails,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl SiteConfig {
    /// Defaults for everything except the backend connection.
    #[must_use]
    pub fn new(backend: GatewayConfig) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: PathBuf::from("crates/site/static"),
            backend,
            event: EventDetails::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("SITE_HOST", "127.0.0.1")?;
        let port = parse_env("SITE_PORT", "3000")?;
        let base_url = get_required_env("SITE_BASE_URL")?;
        let static_dir = PathBuf::from(get_env_or_default("SITE_STATIC_DIR", "crates/site/static"));
        let backend = GatewayConfig::from_env()?;
        let event = EventDetails::from_lookup(|name| std::env::var(name).ok());

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            backend,
            event,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn backend() -> GatewayConfig {
        GatewayConfig::new("https://project.example.com", "anon-key-value").unwrap()
    }

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig::new(backend());
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_debug_redacts_backend_key() {
        let config = SiteConfig::new(backend());
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("project.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("anon-key-value"));
    }

    #[test]
    fn test_backend_error_is_wrapped() {
        let err = ConfigError::from(GatewayError::MissingConfig("BACKEND_URL"));
        assert_eq!(
            err.to_string(),
            "Backend configuration: missing configuration: BACKEND_URL"
        );
    }
}
