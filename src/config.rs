// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Base URL used when `SHUTTER_QUEST_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// How often the home screen refreshes the point total.
pub const DEFAULT_POINTS_REFRESH_SECS: u64 = 30;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Shutter Quest API (no trailing slash)
    pub api_url: String,
    /// Point total refresh period
    pub points_refresh: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            points_refresh: Duration::from_secs(DEFAULT_POINTS_REFRESH_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("SHUTTER_QUEST_API_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let refresh_secs = match env::var("POINTS_REFRESH_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid("POINTS_REFRESH_SECS", raw.clone()))?,
            Err(_) => DEFAULT_POINTS_REFRESH_SECS,
        };

        Self::default()
            .with_api_url(&api_url)
            .map(|config| Self {
                points_refresh: Duration::from_secs(refresh_secs),
                ..config
            })
    }

    /// Replace the API base URL, normalising away trailing slashes.
    pub fn with_api_url(self, api_url: &str) -> Result<Self, ConfigError> {
        let api_url = api_url.trim_end_matches('/');
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(
                "SHUTTER_QUEST_API_URL",
                api_url.to_string(),
            ));
        }

        Ok(Self {
            api_url: api_url.to_string(),
            ..self
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
