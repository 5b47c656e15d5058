//! Data access gateway for the hosted PostgREST backend.
//!
//! # Tables
//!
//! - `confirmations` - RSVP parties ([`ConfirmationRepository`])
//! - `admin_settings` - guest cap and registration switch ([`SettingsRepository`])
//! - `gifts` - gift suggestions ([`GiftRepository`])
//!
//! Every request goes to `<url>/rest/v1/<table>` with the anon key sent as
//! both `apikey` and bearer token. Nothing is cached between calls.

pub mod confirmations;
pub mod gifts;
pub mod query;
pub mod settings;

use core::fmt;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub use confirmations::{ConfirmationRepository, InsertOutcome};
pub use gifts::GiftRepository;
pub use query::{Direction, Query};
pub use settings::SettingsRepository;

/// Environment variables holding the backend URL, in lookup order.
pub const URL_VARS: [&str; 2] = ["BACKEND_URL", "SUPABASE_URL"];

/// Environment variables holding the anon API key, in lookup order.
pub const KEY_VARS: [&str; 2] = ["BACKEND_ANON_KEY", "SUPABASE_ANON_KEY"];

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required configuration value is absent or empty.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// The configured backend URL cannot be parsed.
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    /// The anon key cannot be sent as a header value.
    #[error("invalid anon key: not a valid header value")]
    InvalidKey,

    /// The request never produced a response.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error body. Displays the raw message.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The response body did not match the expected rows.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// No row matched the filter.
    #[error("not found")]
    NotFound,
}

impl GatewayError {
    /// HTTP status of an API error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// PostgREST error body.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl GatewayError {
    /// Build an [`GatewayError::Api`] from a failed response body.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ApiErrorBody>(body).ok();
        let code = parsed.as_ref().and_then(|b| b.code.clone());
        let message = parsed
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.trim().to_string()
                }
            });
        Self::Api {
            status,
            code,
            message,
        }
    }
}

/// Backend connection settings.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: Url,
    /// Public anon key.
    pub anon_key: SecretString,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl GatewayConfig {
    /// Build a config from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingConfig`] for empty values and
    /// [`GatewayError::InvalidUrl`] when the URL does not parse.
    pub fn new(url: &str, anon_key: &str) -> Result<Self, GatewayError> {
        if url.trim().is_empty() {
            return Err(GatewayError::MissingConfig(URL_VARS[0]));
        }
        if anon_key.trim().is_empty() {
            return Err(GatewayError::MissingConfig(KEY_VARS[0]));
        }
        let url = Url::parse(url.trim()).map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            url,
            anon_key: SecretString::from(anon_key.trim().to_string()),
        })
    }

    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when either value is missing or the URL is invalid.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Fails when either value is missing or the URL is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GatewayError> {
        let first = |names: [&'static str; 2]| {
            names
                .iter()
                .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
                .ok_or(GatewayError::MissingConfig(names[0]))
        };
        let url = first(URL_VARS)?;
        let key = first(KEY_VARS)?;
        Self::new(&url, &key)
    }
}

/// Tables exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Confirmations,
    AdminSettings,
    Gifts,
}

impl Table {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmations => "confirmations",
            Self::AdminSettings => "admin_settings",
            Self::Gifts => "gifts",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client bound to one backend project.
#[derive(Clone)]
pub struct Gateway {
    client: reqwest::Client,
    rest_root: Url,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("rest_root", &self.rest_root.as_str())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Create a gateway with the key installed as default headers.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let key = config.anon_key.expose_secret();
        let mut headers = HeaderMap::new();

        let mut apikey = HeaderValue::from_str(key)
            .map_err(|_| GatewayError::InvalidKey)?;
        apikey.set_sensitive(true);
        headers.insert("apikey", apikey);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| GatewayError::InvalidKey)?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let mut base = config.url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let rest_root = Url::parse(&base)
            .and_then(|u| u.join("rest/v1/"))
            .map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;

        Ok(Self { client, rest_root })
    }

    /// Start a query against `table`.
    #[must_use]
    pub fn table(&self, table: Table) -> Query<'_> {
        Query::new(self, table)
    }

    #[must_use]
    pub const fn confirmations(&self) -> ConfirmationRepository<'_> {
        ConfirmationRepository::new(self)
    }

    #[must_use]
    pub const fn settings(&self) -> SettingsRepository<'_> {
        SettingsRepository::new(self)
    }

    #[must_use]
    pub const fn gifts(&self) -> GiftRepository<'_> {
        GiftRepository::new(self)
    }

    pub(crate) const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn endpoint(&self, table: Table) -> Result<Url, GatewayError> {
        self.rest_root
            .join(table.as_str())
            .map_err(|e| GatewayError::InvalidUrl(e.to_string()))
    }
}
