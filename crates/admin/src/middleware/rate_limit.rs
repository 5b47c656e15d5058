//! Rate limiting for the login form using governor and `tower_governor`.

use std::sync::Arc;

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiter for login attempts: 5 per minute per IP, burst of 5.
///
/// The client IP comes from `X-Forwarded-For`, `X-Real-IP` or `Forwarded`,
/// falling back to the peer address (requires `ConnectInfo`).
///
/// # Panics
///
/// Never panics: `per_second(12)` and `burst_size(5)` are valid settings.
#[must_use]
pub fn login_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(12)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(12) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}
