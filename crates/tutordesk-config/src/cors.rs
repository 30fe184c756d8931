//! CORS configuration.
//!
//! # Environment Variables
//!
//! - `ALLOWED_ORIGINS`: Comma-separated browser origins allowed to call the
//!   API (default: the local front office and the API's own Swagger UI)

use std::env;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8080,http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.into());
        Self::from_list(&raw)
    }

    /// Browsers send `Origin` without a trailing slash, so one pasted from an
    /// address bar is trimmed to still match.
    pub fn from_list(raw: &str) -> Self {
        let mut allowed_origins: Vec<String> = Vec::new();
        for origin in raw.split(',').map(|s| s.trim().trim_end_matches('/')) {
            if !origin.is_empty() && !allowed_origins.iter().any(|o| o == origin) {
                allowed_origins.push(origin.to_string());
            }
        }

        Self { allowed_origins }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_list(DEFAULT_ALLOWED_ORIGINS)
    }
}
