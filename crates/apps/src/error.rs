//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Loaders, actions and route handlers all return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::client::ClientError;

/// Application-level error type for adapters and the invoke host.
#[derive(Debug, Error)]
pub enum AppError {
    /// Vendor API call failed.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Typed HTTP error raised by a block (e.g. a missing cart cookie).
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No loader or action is registered under the key.
    #[error("Unknown block: {0}")]
    UnknownBlock(String),

    /// Props did not match the block's input type.
    #[error("Invalid props: {0}")]
    InvalidProps(#[from] serde_json::Error),

    /// The block belongs to an app that is not configured.
    #[error("App not installed: {0}")]
    AppNotInstalled(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a typed HTTP error.
    #[must_use]
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Status code the error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Client(_) => StatusCode::BAD_GATEWAY,
            Self::Http { status, .. } => *status,
            Self::BadRequest(_) | Self::InvalidProps(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::UnknownBlock(_) => StatusCode::NOT_FOUND,
            Self::AppNotInstalled(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Client(ClientError::UserError(msg)) => msg.clone(),
            Self::Client(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for an invoked block.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of blocks
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::http(StatusCode::BAD_REQUEST, "Missing cart cookie");
        assert_eq!(err.to_string(), "Missing cart cookie");

        let err = AppError::UnknownBlock("wake/loaders/nope.ts".to_string());
        assert_eq!(err.to_string(), "Unknown block: wake/loaders/nope.ts");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Client(ClientError::RateLimited(1))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::http(StatusCode::BAD_REQUEST, "Missing cart cookie")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::UnknownBlock("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::AppNotInstalled("vtex".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let props_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        assert_eq!(
            get_status(AppError::InvalidProps(props_err)),
            StatusCode::BAD_REQUEST
        );
    }
}
