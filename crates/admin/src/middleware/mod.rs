//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (stricter CSP for admin)
//! 5. Session layer (tower-sessions, in-memory store)
//! 6. Rate limiting on `POST /auth/login` (governor)
//! 7. Auth guard (`RequireAdminAuth` extractor on every dashboard route)

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{RequireAdminAuth, clear_current_admin, set_current_admin};
pub use rate_limit::login_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
