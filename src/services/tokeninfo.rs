// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google tokeninfo client.
//!
//! Bearer tokens are verified remotely: signature, issuer, and expiry are
//! checked by Google, not locally. We only ship the opaque token to the
//! endpoint and read back the claims it reports.

use anyhow::Context;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_TOKENINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/tokeninfo";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Token metadata reported by Google's tokeninfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    /// Client ID the token was issued for (the audience claim).
    #[serde(default)]
    pub audience: String,
    /// Stable Google account identifier.
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    /// Seconds until the token expires, relative to Google's clock.
    #[serde(default)]
    pub expires_in: i64,
    /// Workspace hosted domain, present only for managed accounts.
    #[serde(default)]
    pub hd: Option<String>,
    #[serde(default)]
    pub verified_email: Option<bool>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub issued_to: Option<String>,
}

/// Tokeninfo failures. The auth middleware collapses all of these into a
/// single 401 for the caller; the distinction only matters for server logs.
#[derive(Debug, thiserror::Error)]
pub enum TokenInfoError {
    /// The endpoint could not be reached or answered garbage (DNS, TLS,
    /// timeout, JSON decode).
    #[error("tokeninfo request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered and rejected the token.
    #[error("tokeninfo rejected token: HTTP {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    /// Static-mode only: token not present in the seeded map.
    #[error("unknown token")]
    UnknownToken,
}

enum ClientMode {
    Remote {
        http: reqwest::Client,
        endpoint: String,
    },
    Static {
        tokens: HashMap<String, TokenInfo>,
    },
}

/// Client for Google's OAuth2 tokeninfo endpoint.
///
/// Built once at startup and shared read-only by every request evaluation;
/// the underlying `reqwest::Client` pools connections and is safe for
/// concurrent use.
pub struct TokenInfoClient {
    mode: ClientMode,
}

impl TokenInfoClient {
    /// Create a production client that calls Google's tokeninfo endpoint.
    ///
    /// A failure here is fatal for the composing service: without a working
    /// client no request can be authenticated.
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building tokeninfo HTTP client")?;

        tracing::info!(
            endpoint = DEFAULT_TOKENINFO_URL,
            timeout_secs = DEFAULT_HTTP_TIMEOUT.as_secs(),
            "Initialized tokeninfo client"
        );

        Ok(Self {
            mode: ClientMode::Remote {
                http,
                endpoint: DEFAULT_TOKENINFO_URL.to_string(),
            },
        })
    }

    /// Create a client that resolves tokens from an in-memory map.
    ///
    /// This is intended for deterministic local/integration tests.
    pub fn new_with_static_tokens(tokens: HashMap<String, TokenInfo>) -> Self {
        Self {
            mode: ClientMode::Static { tokens },
        }
    }

    /// Verify an opaque bearer token and return the claims Google reports.
    ///
    /// Tokens are never cached: every call re-consults the endpoint.
    pub async fn verify(&self, token: &str) -> Result<TokenInfo, TokenInfoError> {
        match &self.mode {
            ClientMode::Static { tokens } => tokens
                .get(token)
                .cloned()
                .ok_or(TokenInfoError::UnknownToken),
            ClientMode::Remote { http, endpoint } => {
                // The token travels as a query parameter, matching the
                // endpoint's contract. Never log the request URL.
                let response = http
                    .post(endpoint)
                    .query(&[("access_token", token)])
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(TokenInfoError::Rejected { status, body });
                }

                Ok(response.json().await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_client() -> TokenInfoClient {
        let mut tokens = HashMap::new();
        tokens.insert(
            "tok-1".to_string(),
            TokenInfo {
                audience: "client-123".to_string(),
                user_id: "u1".to_string(),
                email: "a@example.com".to_string(),
                expires_in: 3600,
                hd: Some("example.com".to_string()),
                verified_email: Some(true),
                scope: None,
                issued_to: None,
            },
        );
        TokenInfoClient::new_with_static_tokens(tokens)
    }

    #[tokio::test]
    async fn static_mode_returns_seeded_claims() {
        let client = seeded_client();

        let info = client.verify("tok-1").await.expect("seeded token");
        assert_eq!(info.audience, "client-123");
        assert_eq!(info.user_id, "u1");
        assert_eq!(info.email, "a@example.com");
        assert_eq!(info.hd.as_deref(), Some("example.com"));
    }

    #[tokio::test]
    async fn static_mode_rejects_unknown_token() {
        let client = seeded_client();

        assert!(matches!(
            client.verify("tok-unknown").await,
            Err(TokenInfoError::UnknownToken)
        ));
    }

    #[test]
    fn deserializes_full_tokeninfo_response() {
        // Shape of a real oauth2/v2 tokeninfo answer for a Workspace account.
        let body = r#"{
            "issued_to": "client-123.apps.googleusercontent.com",
            "audience": "client-123.apps.googleusercontent.com",
            "user_id": "108923498234",
            "scope": "openid email profile",
            "expires_in": 3592,
            "email": "person@example.com",
            "verified_email": true,
            "hd": "example.com",
            "access_type": "online"
        }"#;

        let info: TokenInfo = serde_json::from_str(body).expect("valid tokeninfo JSON");
        assert_eq!(info.audience, "client-123.apps.googleusercontent.com");
        assert_eq!(info.user_id, "108923498234");
        assert_eq!(info.expires_in, 3592);
        assert_eq!(info.hd.as_deref(), Some("example.com"));
        assert_eq!(info.verified_email, Some(true));
    }

    #[test]
    fn deserializes_minimal_tokeninfo_response() {
        // Consumer accounts without the email scope report far fewer fields;
        // absent ones default rather than failing the decode.
        let body = r#"{
            "audience": "client-123",
            "user_id": "42",
            "expires_in": 100
        }"#;

        let info: TokenInfo = serde_json::from_str(body).expect("valid tokeninfo JSON");
        assert_eq!(info.audience, "client-123");
        assert_eq!(info.email, "");
        assert_eq!(info.hd, None);
        assert_eq!(info.verified_email, None);
    }
}
