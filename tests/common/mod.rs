// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use authgate::config::Config;
use authgate::routes::create_router;
use authgate::services::{TokenInfo, TokenInfoClient};
use authgate::AppState;
use std::collections::HashMap;
use std::sync::Arc;

/// Build tokeninfo claims the way the live endpoint reports them.
#[allow(dead_code)]
pub fn token_info(
    audience: &str,
    user_id: &str,
    email: &str,
    expires_in: i64,
    hd: Option<&str>,
) -> TokenInfo {
    TokenInfo {
        audience: audience.to_string(),
        user_id: user_id.to_string(),
        email: email.to_string(),
        expires_in,
        hd: hd.map(str::to_string),
        verified_email: Some(true),
        scope: Some("openid email profile".to_string()),
        issued_to: Some(audience.to_string()),
    }
}

/// Create a test app whose tokeninfo client resolves exactly the given
/// tokens, with no network involved.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(
    config: Config,
    tokens: HashMap<String, TokenInfo>,
) -> (axum::Router, Arc<AppState>) {
    let tokeninfo = TokenInfoClient::new_with_static_tokens(tokens);

    let state = Arc::new(AppState { config, tokeninfo });

    (create_router(state.clone()), state)
}
