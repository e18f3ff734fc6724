// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote REST backend (no trailing slash)
    pub api_base_url: String,
    /// Server port
    pub port: u16,
    /// Mark auth cookies `Secure` (disable only for plain-HTTP local dev)
    pub cookie_secure: bool,
    /// Path of the login page
    pub login_path: String,
    /// Root of the authenticated dashboard
    pub dashboard_path: String,
    /// Paths reachable without a session, matched exactly or as a segment prefix
    pub public_paths: Vec<String>,
    /// Lifetime of cached view data, in seconds
    pub cache_ttl_secs: u64,
}

pub const DEFAULT_PUBLIC_PATHS: &str = "/,/health,/actions";

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:9".to_string(),
            port: 8080,
            cookie_secure: false,
            login_path: "/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
            public_paths: parse_path_list(DEFAULT_PUBLIC_PATHS),
            cache_ttl_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("BACKEND_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .map_err(|_| ConfigError::Missing("BACKEND_API_URL"))?;
        if api_base_url.is_empty() {
            return Err(ConfigError::Invalid("BACKEND_API_URL", "empty".to_string()));
        }

        let cookie_secure = match env::var("COOKIE_SECURE") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("COOKIE_SECURE", raw))?,
            Err(_) => true,
        };

        Ok(Self {
            api_base_url,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            cookie_secure,
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            dashboard_path: env::var("DASHBOARD_PATH")
                .unwrap_or_else(|_| "/dashboard".to_string()),
            public_paths: parse_path_list(
                &env::var("PUBLIC_PATHS").unwrap_or_else(|_| DEFAULT_PUBLIC_PATHS.to_string()),
            ),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        })
    }

    /// Test configuration pointing at the given backend.
    pub fn for_backend(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}

fn parse_path_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
