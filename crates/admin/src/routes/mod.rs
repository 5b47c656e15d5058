//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness
//! GET  /health/ready                 - Backend reachability
//!
//! # Auth (password, rate limited)
//! GET  /auth/login                   - Login page
//! POST /auth/login                   - Check password, open session
//! POST /auth/logout                  - Logout
//!
//! # Dashboard
//! GET  /                             - Aggregates, settings, confirmations, gifts
//! GET  /guest-list?order=            - Printable guest list
//!
//! # Settings
//! POST /settings/max-guests          - Update guest cap
//! POST /settings/registration        - Pause or reopen registrations
//!
//! # Confirmations
//! GET  /confirmations/{id}/delete    - Removal dialog
//! POST /confirmations/{id}/delete    - Remove
//!
//! # Gifts
//! POST /gifts                        - Add
//! GET  /gifts/{id}/edit              - Edit form
//! POST /gifts/{id}                   - Save name and description
//! POST /gifts/{id}/toggle            - Show or hide
//! POST /gifts/{id}/delete            - Remove
//! ```

pub mod auth;
pub mod confirmations;
pub mod dashboard;
pub mod gifts;
pub mod guest_list;
pub mod health;
pub mod settings;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Create the admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/", get(dashboard::index))
        .route("/guest-list", get(guest_list::export))
        .merge(auth::router())
        .merge(settings::router())
        .merge(confirmations::router())
        .merge(gifts::router())
}

/// Build the complete admin application: routes, sessions, static files
/// and middleware.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
