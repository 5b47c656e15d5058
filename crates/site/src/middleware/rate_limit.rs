//! Rate limiting middleware using governor and `tower_governor`.
//!
//! RSVP submissions are limited per client IP so a single visitor cannot
//! flood the `confirmations` table.

use std::net::IpAddr;
use std::sync::Arc;

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Proxy headers checked for the client IP, most trusted first.
const CLIENT_IP_HEADERS: [&str; 3] = ["cf-connecting-ip", "x-real-ip", "fly-client-ip"];

/// Key extractor that reads the client IP from proxy headers.
///
/// `CF-Connecting-IP` wins, then the first hop of `X-Forwarded-For`, then
/// `X-Real-IP` and `Fly-Client-IP`.
#[derive(Clone, Copy)]
pub struct ProxyIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ProxyIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();
        let header_ip = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.split(',').next())
                .and_then(|s| s.trim().parse::<IpAddr>().ok())
        };

        header_ip(CLIENT_IP_HEADERS[0])
            .or_else(|| header_ip("x-forwarded-for"))
            .or_else(|| CLIENT_IP_HEADERS.iter().skip(1).find_map(|h| header_ip(h)))
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ProxyIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiter for RSVP submissions: ~6 per minute per IP, burst of 5.
///
/// # Panics
///
/// Never panics: `per_second(10)` and `burst_size(5)` are valid settings.
#[must_use]
pub fn rsvp_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(10)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(10) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_governor::key_extractor::KeyExtractor;

    fn extract(headers: &[(&str, &str)]) -> Option<IpAddr> {
        let mut builder = Request::builder();
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(()).ok()?;
        ProxyIpKeyExtractor.extract(&request).ok()
    }

    #[test]
    fn test_cloudflare_header_wins() {
        let ip = extract(&[
            ("x-forwarded-for", "10.0.0.1"),
            ("cf-connecting-ip", "203.0.113.9"),
        ]);
        assert_eq!(ip, "203.0.113.9".parse().ok());
    }

    #[test]
    fn test_forwarded_for_first_hop() {
        let ip = extract(&[("x-forwarded-for", "198.51.100.4, 10.0.0.1")]);
        assert_eq!(ip, "198.51.100.4".parse().ok());
    }

    #[test]
    fn test_fly_header_fallback() {
        let ip = extract(&[("fly-client-ip", "2001:db8::1")]);
        assert_eq!(ip, "2001:db8::1".parse().ok());
    }

    #[test]
    fn test_no_headers() {
        assert_eq!(extract(&[]), None);
    }
}
