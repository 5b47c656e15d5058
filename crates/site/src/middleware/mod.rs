//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame and referrer policy)
//! 5. Rate limiting on `POST /rsvp` (governor)

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use rate_limit::rsvp_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
