//! Application configuration loaded from environment variables.
//!
//! Everything here is read once at startup and shared read-only across all
//! request evaluations for the life of the process.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID; tokens must carry this exact audience.
    pub google_client_id: String,
    /// Google Workspace domain restriction. `None` disables the check.
    pub allowed_domain: Option<String>,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let google_client_id = env::var("GOOGLE_CLIENT_ID")
            .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?
            .trim()
            .to_string();
        if google_client_id.is_empty() {
            return Err(ConfigError::Empty("GOOGLE_CLIENT_ID"));
        }

        Ok(Self {
            google_client_id,
            allowed_domain: normalize_domain(env::var("ALLOWED_DOMAIN").ok()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            google_client_id: "test-client-id".to_string(),
            allowed_domain: None,
            port: 8080,
        }
    }
}

/// An unset or empty `ALLOWED_DOMAIN` means "no domain restriction".
fn normalize_domain(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Environment variable must not be empty: {0}")]
    Empty(&'static str),
}
