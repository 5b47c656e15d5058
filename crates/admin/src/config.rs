//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the admin panel
//! - `ADMIN_PASSWORD_HASH` - Argon2 PHC string of the admin password
//!   (generate with `invite-cli password hash`)
//! - `BACKEND_URL` (or `SUPABASE_URL`) - Hosted backend project URL
//! - `BACKEND_ANON_KEY` (or `SUPABASE_ANON_KEY`) - Backend anon API key
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_STATIC_DIR` - Static assets directory (default: crates/admin/static)
//! - `EVENT_*` - Event detail overrides (honoree name in the header)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0-1.0 (default: 0.0)
//!
//! ## Optional (TLS)
//! - `ADMIN_TLS_CERT` - PEM-encoded certificate chain
//! - `ADMIN_TLS_KEY` - PEM-encoded private key

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use argon2::PasswordHash;
use invite_core::EventDetails;
use invite_core::backend::{GatewayConfig, GatewayError};
use secrecy::{ExposeSecret, SecretString};
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

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Argon2 hash of the admin password
    pub password_hash: PasswordHashString,
    /// Hosted backend connection
    pub backend: GatewayConfig,
    /// Event details (honoree shown in the header)
    pub event: EventDetails,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// A validated Argon2 PHC string.
///
/// Implements `Debug` manually so the hash never reaches logs.
#[derive(Clone)]
pub struct PasswordHashString(SecretString);

impl PasswordHashString {
    /// Validate a PHC string.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `phc` is not a PHC-formatted hash.
    pub fn parse(phc: &str) -> Result<Self, argon2::password_hash::Error> {
        PasswordHash::new(phc.trim())?;
        Ok(Self(SecretString::from(phc.trim().to_string())))
    }

    /// The PHC string.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for PasswordHashString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone)]
pub struct TlsConfig {
    pub cert_pem: String,
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl TlsConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let cert_pem = get_optional_env("ADMIN_TLS_CERT");
        let key_pem = get_optional_env("ADMIN_TLS_KEY");

        match (cert_pem, key_pem) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "ADMIN_TLS_*".to_string(),
                "Both ADMIN_TLS_CERT and ADMIN_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

impl AdminConfig {
    /// Configuration with local defaults, for tests and embedding.
    #[must_use]
    pub fn new(backend: GatewayConfig, password_hash: PasswordHashString) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            static_dir: PathBuf::from("crates/admin/static"),
            password_hash,
            backend,
            event: EventDetails::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
            tls: None,
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
        let _ = dotenvy::dotenv();

        let host = parse_env("ADMIN_HOST", "127.0.0.1")?;
        let port = parse_env("ADMIN_PORT", "3001")?;
        let base_url = get_required_env("ADMIN_BASE_URL")?;
        let static_dir =
            PathBuf::from(get_env_or_default("ADMIN_STATIC_DIR", "crates/admin/static"));
        let password_hash = PasswordHashString::parse(&get_required_env("ADMIN_PASSWORD_HASH")?)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ADMIN_PASSWORD_HASH".to_string(), e.to_string())
            })?;
        let backend = GatewayConfig::from_env()?;
        let event = EventDetails::from_lookup(|name| std::env::var(name).ok());
        let tls = TlsConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            static_dir,
            password_hash,
            backend,
            event,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
            tls,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.tls.is_some() || self.base_url.starts_with("https://")
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
