// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// API routes (require a verified bearer token).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

/// Current user response.
#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub email: String,
}

/// Identity of the authenticated caller, as attached by the auth middleware.
async fn get_me(Extension(user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id,
        email: user.email,
    })
}
