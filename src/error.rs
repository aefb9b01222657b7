// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// The authentication variants all map to 401 except `DomainNotAllowed`,
/// where the credential itself is valid and only the domain policy
/// rejects it (403).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authorization header required")]
    MissingCredential,

    #[error("Authorization header format must be Bearer {{token}}")]
    MalformedCredential,

    #[error("Invalid token")]
    InvalidCredential,

    #[error("Token expired")]
    CredentialExpired,

    #[error("Invalid token audience")]
    AudienceMismatch,

    #[error("Access restricted to domain {0}")]
    DomainNotAllowed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::MissingCredential => {
                (StatusCode::UNAUTHORIZED, "missing_credential", None)
            }
            AppError::MalformedCredential => {
                (StatusCode::UNAUTHORIZED, "malformed_credential", None)
            }
            // Tokeninfo error text is logged at the middleware, never
            // echoed back to untrusted callers.
            AppError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                "invalid_credential",
                Some("token verification failed".to_string()),
            ),
            AppError::CredentialExpired => {
                (StatusCode::UNAUTHORIZED, "credential_expired", None)
            }
            AppError::AudienceMismatch => {
                (StatusCode::UNAUTHORIZED, "audience_mismatch", None)
            }
            AppError::DomainNotAllowed(domain) => (
                StatusCode::FORBIDDEN,
                "domain_not_allowed",
                Some(format!("access restricted to domain {}", domain)),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
