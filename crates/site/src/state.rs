//! Application state shared across handlers.

use std::sync::Arc;

use invite_core::EventDetails;
use invite_core::backend::{Gateway, GatewayError};

use crate::config::SiteConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the backend gateway and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    gateway: Gateway,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, GatewayError> {
        let gateway = Gateway::new(&config.backend)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, gateway }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the backend gateway.
    #[must_use]
    pub fn gateway(&self) -> &Gateway {
        &self.inner.gateway
    }

    /// Event details shown on every page.
    #[must_use]
    pub fn event(&self) -> &EventDetails {
        &self.inner.config.event
    }
}
