//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Expected backend failures are rendered in-page
//! by the handlers themselves; `AppError` covers everything else.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use invite_core::RsvpError;
use invite_core::backend::GatewayError;
use thiserror::Error;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend request failed.
    #[error("Backend error: {0}")]
    Backend(#[from] GatewayError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<RsvpError> for AppError {
    fn from(err: RsvpError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Backend(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Backend(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use invite_core::PartySizeError;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/nope".to_string());
        assert_eq!(err.to_string(), "Not found: /nope");

        let err = AppError::from(RsvpError::PartySize(PartySizeError::NotANumber));
        assert_eq!(err.to_string(), "Bad request: party size must be a number");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Backend(GatewayError::NotFound)),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
