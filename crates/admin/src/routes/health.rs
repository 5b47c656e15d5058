//! Health check endpoints.

use axum::extract::State;

use crate::error::Result;
use crate::state::AppState;

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 502 Bad Gateway if the backend cannot be read.
pub async fn readiness(State(state): State<AppState>) -> Result<&'static str> {
    state.gateway().settings().current().await?;
    Ok("ok")
}
