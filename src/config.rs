//! Configuration Module
//!
//! Handles loading the Pokedex configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL and reap period in seconds
    pub cache_interval: u64,
    /// Root URL of the PokeAPI
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
    /// Location areas fetched per `map`/`mapb` page
    pub page_size: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_INTERVAL_SECS` - Cache TTL / reap interval (default: 5)
    /// - `POKEAPI_BASE_URL` - API root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_REQUEST_TIMEOUT_SECS` - HTTP timeout (default: 10)
    /// - `POKEDEX_PAGE_SIZE` - Location areas per page (default: 20)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_interval: parse_var("POKEDEX_CACHE_INTERVAL_SECS")
                .unwrap_or(defaults.cache_interval),
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            request_timeout: parse_var("POKEDEX_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout),
            page_size: parse_var("POKEDEX_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
        }
    }

    /// Cache interval as a `Duration`.
    pub fn cache_interval(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: 5,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: 10,
            page_size: 20,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
