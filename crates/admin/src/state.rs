//! Application state shared across handlers.

use std::sync::Arc;

use invite_core::backend::{Gateway, GatewayError};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    gateway: Gateway,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, GatewayError> {
        let gateway = Gateway::new(&config.backend)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, gateway }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn gateway(&self) -> &Gateway {
        &self.inner.gateway
    }
}
