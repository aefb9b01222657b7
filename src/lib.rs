// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Authgate: bearer-token gateway for Google-authenticated APIs
//!
//! This crate provides the backend service that fronts protected API routes
//! with Google OAuth access-token validation via the tokeninfo endpoint.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

use config::Config;
use services::TokenInfoClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tokeninfo: TokenInfoClient,
}
