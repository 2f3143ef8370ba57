//! Unified error handling for the storefront.
//!
//! Provides a unified `AppError` type mapped onto user-facing responses at
//! the workflow boundary. All route handlers return `Result<T, AppError>`;
//! none of these errors crash the process.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::store::StoreError;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending form field.
    pub field: &'static str,
    /// Human-readable message, suitable for redisplay next to the field.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found (product, order reference).
    #[error("not found: {0}")]
    NotFound(String),

    /// Form validation failed; redisplay with per-field messages.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Order submission attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Caller is not logged in (or not permitted).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Backing store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Session load/save failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct ValidationBody {
    errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side failures are logged; user errors are not.
        if matches!(self, Self::Store(_) | Self::Session(_)) {
            tracing::error!(error = %self, "request error");
        }

        match self {
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: format!("not found: {what}"),
                }),
            )
                .into_response(),

            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationBody { errors }),
            )
                .into_response(),

            // Business-rule precondition, user-visible: back to the catalog.
            Self::EmptyCart => Redirect::to("/products/").into_response(),

            Self::Unauthorized(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "unauthorized".to_owned(),
                }),
            )
                .into_response(),

            Self::Auth(err) => {
                let status = match &err {
                    AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    AuthError::UsernameTaken => StatusCode::CONFLICT,
                    AuthError::WeakPassword(_)
                    | AuthError::PasswordMismatch
                    | AuthError::InvalidUsername(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    AuthError::Store(_) | AuthError::Hash => StatusCode::INTERNAL_SERVER_ERROR,
                };
                // Don't expose internal error details to clients
                let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!(error = %err, "auth backend error");
                    "internal server error".to_owned()
                } else {
                    err.to_string()
                };
                (status, Json(ErrorBody { error: message })).into_response()
            }

            Self::Store(_) | Self::Session(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "internal server error".to_owned(),
                }),
            )
                .into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("product 9".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Validation(vec![FieldError::new(
                "price",
                "must be a non-negative number"
            )])),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Unauthorized("admin only".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Store(StoreError::Backend("down".to_owned()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_empty_cart_redirects_to_catalog() {
        let response = AppError::EmptyCart.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/products/");
    }

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::UsernameTaken)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::PasswordMismatch)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
