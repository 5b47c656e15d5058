//! Health check endpoints.

use axum::extract::State;

use crate::error::Result;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Reads the settings row to prove the backend is reachable with the
/// configured key. Returns 503 Service Unavailable otherwise.
pub async fn readiness(State(state): State<AppState>) -> Result<&'static str> {
    state.gateway().settings().current().await?;
    Ok("ok")
}
