// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authgate API Server
//!
//! Guards API routes with Google OAuth bearer-token validation against the
//! tokeninfo endpoint, with optional Workspace domain restriction.

use authgate::{config::Config, services::TokenInfoClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        audience = %config.google_client_id,
        domain_restricted = config.allowed_domain.is_some(),
        "Starting Authgate API"
    );

    // Initialize the tokeninfo client. Without a working verification
    // client no request can be authenticated, so a failure here aborts
    // startup instead of serving unprotected.
    let tokeninfo = TokenInfoClient::new().expect("Failed to initialize tokeninfo client");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        tokeninfo,
    });

    // Build router
    let app = authgate::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("authgate=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
