//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Landing page
//! GET  /invitation     - Invitation with the three actions
//! GET  /rsvp           - RSVP form (query string re-renders a resized party)
//! POST /rsvp           - Submit an RSVP, redirect to WhatsApp
//! GET  /gifts          - Gift suggestions
//! GET  /location       - Venue and map links
//! GET  /health         - Liveness
//! GET  /health/ready   - Backend reachability
//! GET  /static/*       - Stylesheet and images
//! ```

pub mod gifts;
pub mod health;
pub mod home;
pub mod location;
pub mod rsvp;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::{request_id_middleware, rsvp_rate_limiter, security_headers_middleware};
use crate::state::AppState;

/// Create the page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::landing))
        .route("/invitation", get(home::invitation))
        .route("/rsvp", get(rsvp::form))
        .route("/rsvp", post(rsvp::submit).route_layer(rsvp_rate_limiter()))
        .route("/gifts", get(gifts::index))
        .route("/location", get(location::show))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Build the complete application: routes, static files and middleware.
///
/// Sentry layers are added by the binary so tests can drive this router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
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

async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
