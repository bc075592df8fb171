//! Maps domain `AppError` to HTTP responses.
//!
//! The three authentication kinds all render as the same opaque 401 body;
//! which check failed is internal detail that a response must not leak.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use clinichub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around [`AppError`].
///
/// Handlers return this so `?` propagates domain errors straight into
/// responses.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code, message) = match &err.kind {
            ErrorKind::InvalidCredentials => {
                tracing::debug!(detail = %err.message, "login rejected");
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "Invalid email or password".to_string(),
                )
            }
            ErrorKind::InvalidToken | ErrorKind::SessionRevoked => {
                tracing::debug!(kind = %err.kind, detail = %err.message, "request unauthenticated");
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "Authentication required".to_string(),
                )
            }
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", err.message.clone()),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.message.clone()),
            ErrorKind::Validation => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                err.message.clone(),
            ),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", err.message.clone()),
            ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Internal => {
                tracing::error!(kind = %err.kind, error = %err.message, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_parts(err: AppError) -> (StatusCode, String) {
        let response = ApiError(err).into_response();
        let status = response.status();
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let bytes = rt.block_on(async {
            axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap()
                .to_vec()
        });
        (status, String::from_utf8(bytes).unwrap())
    }

    #[test]
    fn test_auth_failures_share_status_and_hide_detail() {
        let (status, body) = response_parts(AppError::invalid_token("signature mismatch"));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body.contains("signature"));

        let (status, body) = response_parts(AppError::session_revoked("user deactivated"));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body.contains("deactivated"));
    }

    #[test]
    fn test_invalid_credentials_is_uniform() {
        let (status, body) = response_parts(AppError::invalid_credentials("no such email"));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid email or password"));
        assert!(!body.contains("no such email"));
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let (status, body) = response_parts(AppError::database("connection refused to 10.0.0.5"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("10.0.0.5"));
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let (status, body) = response_parts(AppError::conflict("Email already in use"));
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("Email already in use"));

        let (status, _) = response_parts(AppError::forbidden("nope"));
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = response_parts(AppError::not_found("User not found"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = response_parts(AppError::validation("bad email"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
