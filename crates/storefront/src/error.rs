//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`; failures are converted at the
//! response boundary into the `{"success": false, "error": "..."}` envelope
//! and never propagate uncaught into the rendering layer. Server-side errors
//! are captured to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::square::SquareError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Square catalog operation failed.
    #[error("Square error: {0}")]
    Square(#[from] SquareError),

    /// Order submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Provider errors keep the provider's own status code; configuration
    /// problems are a 500; the empty-cart validation error is a 400.
    fn status(&self) -> StatusCode {
        match self {
            Self::Square(err) => match err {
                SquareError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
                SquareError::Api { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                SquareError::Http(_) | SquareError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
                CheckoutError::InProgress => StatusCode::CONFLICT,
                CheckoutError::Provider(_) | CheckoutError::Http(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// User-facing message for this error.
    fn message(&self) -> String {
        match self {
            // Provider messages pass through; transport failures get a
            // generic substitute
            Self::Square(err) => match err {
                SquareError::Api { message, .. } => message.clone(),
                SquareError::NotConfigured => err.to_string(),
                SquareError::Http(_) | SquareError::Parse(_) => {
                    "Failed to fetch menu items".to_string()
                }
            },
            Self::Checkout(err) => err.to_string(),
            Self::Session(_) => "Internal server error".to_string(),
            Self::NotFound(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.status().is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.message(),
        }));

        (self.status(), body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_is_500() {
        assert_eq!(
            AppError::Square(SquareError::NotConfigured).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_provider_error_keeps_provider_status_and_message() {
        let err = AppError::Square(SquareError::Api {
            status: 401,
            message: "Invalid token".to_string(),
        });
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Invalid token");
    }

    #[test]
    fn test_empty_cart_is_400_with_local_message() {
        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Your cart is empty");
    }

    #[test]
    fn test_checkout_provider_failure_is_passed_through() {
        let err = AppError::Checkout(CheckoutError::Provider("x".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.message(), "x");
    }

    #[test]
    fn test_not_found() {
        let err = AppError::NotFound("Unknown menu item: ITEM9".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Unknown menu item: ITEM9");
    }
}
