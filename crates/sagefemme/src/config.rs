use std::{env, time::Duration};

use crate::cache::DEFAULT_TEMPLATE_TTL;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Template cache TTL in seconds (default: 300)
    pub cache_ttl_seconds: u64,
    /// Path to SQLite database file (default: "sagefemme.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub sqlite_path: String,
    /// Seed the built-in system templates into an empty store (default: true)
    pub seed_system_templates: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Template cache TTL in seconds (default: 300)
    /// - `SQLITE_PATH` - SQLite database path (default: "sagefemme.db")
    /// - `SEED_SYSTEM_TEMPLATES` - Seed system templates on startup (default: true)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TEMPLATE_TTL.as_secs()),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "sagefemme.db".to_string()),
            seed_system_templates: env::var("SEED_SYSTEM_TEMPLATES")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
