// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token authentication middleware.
//!
//! Each request is evaluated exactly once, short-circuiting on the first
//! failed check: header present, header well-formed, token verified against
//! Google tokeninfo, audience matches, not expired, domain allowed. On
//! success the caller's identity rides along in the request extensions.

use crate::config::Config;
use crate::error::AppError;
use crate::services::tokeninfo::TokenInfo;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated identity extracted from a verified token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Google account ID (`user_id` reported by tokeninfo)
    pub user_id: String,
    pub email: String,
}

/// Middleware that requires a valid Google bearer token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = match request.headers().get(header::AUTHORIZATION) {
        None => return Err(AppError::MissingCredential),
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::MalformedCredential)?,
    };

    if auth_header.is_empty() {
        return Err(AppError::MissingCredential);
    }

    let token = parse_bearer(auth_header)?;

    // Google checks signature, issuer, and expiry; its error text is
    // logged here and never echoed back to the caller.
    let info = match state.tokeninfo.verify(token).await {
        Ok(info) => info,
        Err(err) => {
            tracing::warn!(error = %err, "Token validation failed");
            return Err(AppError::InvalidCredential);
        }
    };

    let user = check_token_policy(&state.config, info)?;

    tracing::debug!(
        user_id = %user.user_id,
        email = %user.email,
        "Bearer token verified"
    );

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extract the token from a `Bearer <token>` header value.
///
/// Exactly two space-separated parts with a case-insensitive `Bearer`
/// scheme; anything else (extra spaces, empty token, another scheme) is
/// malformed.
fn parse_bearer(value: &str) -> Result<&str, AppError> {
    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() != 2 || !parts[0].eq_ignore_ascii_case("bearer") || parts[1].is_empty() {
        return Err(AppError::MalformedCredential);
    }
    Ok(parts[1])
}

/// Enforce audience, expiry, and domain policy on verified claims.
fn check_token_policy(config: &Config, info: TokenInfo) -> Result<AuthUser, AppError> {
    // A token legitimately issued for a different application must not be
    // accepted here (confused deputy).
    if info.audience != config.google_client_id {
        tracing::warn!(
            expected = %config.google_client_id,
            got = %info.audience,
            "Token audience mismatch"
        );
        return Err(AppError::AudienceMismatch);
    }

    // Google already rejects expired tokens; re-check rather than rely on
    // that alone.
    if info.expires_in <= 0 {
        tracing::warn!(expires_in = info.expires_in, "Token expired");
        return Err(AppError::CredentialExpired);
    }

    if let Some(allowed_domain) = &config.allowed_domain {
        // `hd` is only asserted for managed accounts; a token without one
        // never satisfies a domain restriction.
        let hd = info.hd.as_deref().unwrap_or_default();
        if hd != allowed_domain {
            tracing::warn!(
                expected = %allowed_domain,
                got = %hd,
                email = %info.email,
                "Token hosted domain mismatch"
            );
            return Err(AppError::DomainNotAllowed(allowed_domain.clone()));
        }
    }

    Ok(AuthUser {
        user_id: info.user_id,
        email: info.email,
    })
}
