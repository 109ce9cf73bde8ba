use anyhow::{Context, Result};

use crate::models::idea::CategoryPolicy;

/// Application configuration loaded from environment variables.
///
/// The provider credential is optional at startup: a missing key is reported
/// per request as a configuration error so the health and env-check routes
/// keep working on a half-configured deployment.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub category_policy: CategoryPolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            category_policy: std::env::var("IDEA_CATEGORY_POLICY")
                .unwrap_or_else(|_| "diverse".to_string())
                .parse::<CategoryPolicy>()
                .context("IDEA_CATEGORY_POLICY must be 'diverse' or 'locked'")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

/// Reads an env var, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
