//! Centralized configuration management.
//!
//! All environment variables are read once at startup through this module
//! and the resulting [`AppConfig`] is handed to whatever needs it.

use std::time::Duration;

use songsearch::{catalog::DEFAULT_CATALOG_URL, lyrics::DEFAULT_LYRICS_URL, DEFAULT_TIMEOUT_SECS};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database URL (default: "sqlite:songsearch.db")
    pub database_url: String,
    /// Catalog search endpoint (default: the iTunes search API)
    pub catalog_url: String,
    /// Lyrics search endpoint (default: ChartLyrics SearchLyric)
    pub lyrics_url: String,
    /// Per-request provider timeout in seconds (default: 10)
    pub provider_timeout_secs: u64,
    /// HTTP server port (default: 8000)
    pub port: u16,
    /// HTTP server bind address (default: "0.0.0.0")
    pub ip: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:songsearch.db".to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            lyrics_url: DEFAULT_LYRICS_URL.to_string(),
            provider_timeout_secs: DEFAULT_TIMEOUT_SECS,
            port: 8000,
            ip: "0.0.0.0".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables. Every value has a
    /// default; unparsable numbers and a zero timeout fall back to it.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            catalog_url: lookup("CATALOG_URL").unwrap_or(defaults.catalog_url),
            lyrics_url: lookup("LYRICS_URL").unwrap_or(defaults.lyrics_url),
            provider_timeout_secs: lookup("PROVIDER_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(defaults.provider_timeout_secs),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            ip: lookup("IP").unwrap_or(defaults.ip),
        }
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    pub fn lyrics_url(&self) -> &str {
        &self.lyrics_url
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// `ip:port` to listen on.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}
