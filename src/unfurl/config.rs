//! Configuration for the unfurl service
//!
//! Defines limits for fetching, redirect following, and caching.

use std::env;

/// Configuration for unfurl fetching and caching
#[derive(Debug, Clone)]
pub struct UnfurlConfig {
    /// Maximum redirects followed per unfurl (default: 3)
    pub max_redirects: usize,
    /// Timeout per hop in seconds (default: 4)
    pub timeout_per_hop_secs: u64,
    /// Maximum response body size in bytes (default: 1 MiB)
    pub max_body_bytes: usize,
    /// Cache TTL in seconds (default: 300 = 5 minutes)
    pub cache_ttl_secs: u64,
    /// Maximum cache entries (default: 1000)
    pub max_cache_entries: usize,
    /// User-Agent sent with outbound requests
    pub user_agent: String,
}

impl UnfurlConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_redirects: env::var("UNFURL_MAX_REDIRECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_redirects)
                .min(10), // Cap at 10
            timeout_per_hop_secs: env::var("UNFURL_TIMEOUT_PER_HOP_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_per_hop_secs),
            max_body_bytes: env::var("UNFURL_MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            cache_ttl_secs: env::var("UNFURL_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            max_cache_entries: env::var("UNFURL_MAX_CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_cache_entries),
            user_agent: env::var("UNFURL_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_per_hop_secs == 0 {
            return Err("timeout_per_hop_secs must be at least 1".to_string());
        }
        if self.max_body_bytes < 1024 {
            return Err("max_body_bytes must be at least 1024".to_string());
        }
        if self.cache_ttl_secs == 0 {
            return Err("cache_ttl_secs must be at least 1".to_string());
        }
        if self.max_cache_entries == 0 {
            return Err("max_cache_entries must be at least 1".to_string());
        }
        if self.user_agent.is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for UnfurlConfig {
    fn default() -> Self {
        Self {
            max_redirects: 3,
            timeout_per_hop_secs: 4,
            max_body_bytes: 1024 * 1024,
            cache_ttl_secs: 300,
            max_cache_entries: 1000,
            user_agent: "Mozilla/5.0 (compatible; FabstirUnfurlBot/1.0; +https://fabstir.com)"
                .to_string(),
        }
    }
}
