//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the OpenTDB question endpoint
    pub opentdb_url: String,
    /// Upstream request timeout in seconds
    pub api_timeout: u64,
    /// TTL in seconds for cached upstream responses
    pub cache_ttl: u64,
    /// Maximum number of cached upstream responses
    pub max_cache_entries: usize,
    /// Background cache sweep interval in seconds
    pub cleanup_interval: u64,
    /// Path to the leaderboard SQLite database
    pub db_path: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `OPENTDB_URL` - Upstream question endpoint (default: https://opentdb.com/api.php)
    /// - `API_TIMEOUT` - Upstream timeout in seconds (default: 5)
    /// - `CACHE_TTL` - Response cache TTL in seconds (default: 60)
    /// - `MAX_CACHE_ENTRIES` - Response cache capacity (default: 256)
    /// - `CLEANUP_INTERVAL` - Cache sweep frequency in seconds (default: 30)
    /// - `DB_PATH` - Leaderboard database path (default: trivia.db)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            opentdb_url: env::var("OPENTDB_URL")
                .unwrap_or_else(|_| "https://opentdb.com/api.php".to_string()),
            api_timeout: env::var("API_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            max_cache_entries: env::var("MAX_CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            db_path: env::var("DB_PATH").unwrap_or_else(|_| "trivia.db".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            opentdb_url: "https://opentdb.com/api.php".to_string(),
            api_timeout: 5,
            cache_ttl: 60,
            max_cache_entries: 256,
            cleanup_interval: 30,
            db_path: "trivia.db".to_string(),
        }
    }
}
