//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::EvictionPolicy;
use crate::error::{CacheError, Result};
use crate::services::ScoreMethod;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub cache_size: usize,
    /// Eviction policy used when the cache is full
    pub cache_policy: EvictionPolicy,
    /// Maximum entry age in seconds
    pub cache_ttl: u64,
    /// Answer generator endpoint
    pub llm_service_url: String,
    /// Scorer endpoint
    pub score_service_url: String,
    /// Method requested from the scorer
    pub score_method: ScoreMethod,
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between background expiry sweeps, 0 disables the sweep
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset variables fall back to defaults; set but invalid values are a
    /// configuration error.
    ///
    /// # Environment Variables
    /// - `CACHE_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_POLICY` - LRU, LFU or FIFO, any case (default: LRU)
    /// - `CACHE_TTL` - TTL in seconds (default: 3600)
    /// - `LLM_SERVICE_URL` - Answer generator (default: http://llm:5000/ask)
    /// - `SCORE_SERVICE_URL` - Scorer (default: http://score:6000/score)
    /// - `SCORE_METHOD` - tfidf, jaccard, levenshtein or combined (default: tfidf)
    /// - `SERVER_PORT` - HTTP server port (default: 5002)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 0, disabled)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            cache_size: parse_var("CACHE_SIZE", defaults.cache_size)?,
            cache_policy: parse_var("CACHE_POLICY", defaults.cache_policy)?,
            cache_ttl: parse_var("CACHE_TTL", defaults.cache_ttl)?,
            llm_service_url: env::var("LLM_SERVICE_URL").unwrap_or(defaults.llm_service_url),
            score_service_url: env::var("SCORE_SERVICE_URL")
                .unwrap_or(defaults.score_service_url),
            score_method: parse_var("SCORE_METHOD", defaults.score_method)?,
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
            sweep_interval: parse_var("SWEEP_INTERVAL", defaults.sweep_interval)?,
        };

        if config.cache_size == 0 {
            return Err(CacheError::Configuration(
                "CACHE_SIZE must be a positive integer".to_string(),
            ));
        }

        Ok(config)
    }

    /// TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

/// Reads and parses an environment variable, using `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| {
            CacheError::Configuration(format!("invalid value '{}' for {}: {}", raw, name, e))
        }),
        Err(_) => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size: 100,
            cache_policy: EvictionPolicy::Lru,
            cache_ttl: 3600,
            llm_service_url: "http://llm:5000/ask".to_string(),
            score_service_url: "http://score:6000/score".to_string(),
            score_method: ScoreMethod::Tfidf,
            server_port: 5002,
            sweep_interval: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests in this module mutate the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 8] = [
        "CACHE_SIZE",
        "CACHE_POLICY",
        "CACHE_TTL",
        "LLM_SERVICE_URL",
        "SCORE_SERVICE_URL",
        "SCORE_METHOD",
        "SERVER_PORT",
        "SWEEP_INTERVAL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_size, 100);
        assert_eq!(config.cache_policy, EvictionPolicy::Lru);
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.ttl(), Duration::from_secs(3600));
        assert_eq!(config.score_method, ScoreMethod::Tfidf);
        assert_eq!(config.server_port, 5002);
        assert_eq!(config.sweep_interval, 0);
    }

    #[test]
    fn test_config_from_env_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();
        assert_eq!(config.cache_size, 100);
        assert_eq!(config.cache_policy, EvictionPolicy::Lru);
        assert_eq!(config.llm_service_url, "http://llm:5000/ask");
        assert_eq!(config.score_service_url, "http://score:6000/score");
    }

    #[test]
    fn test_config_from_env_overrides() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("CACHE_SIZE", "5");
        env::set_var("CACHE_POLICY", "fifo");
        env::set_var("CACHE_TTL", "0");
        env::set_var("SCORE_METHOD", "Combined");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.cache_size, 5);
        assert_eq!(config.cache_policy, EvictionPolicy::Fifo);
        assert_eq!(config.cache_ttl, 0);
        assert_eq!(config.score_method, ScoreMethod::Combined);
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("CACHE_POLICY", "random");

        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(CacheError::Configuration(_))));
    }

    #[test]
    fn test_config_rejects_bad_numbers() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("CACHE_SIZE", "0");
        assert!(matches!(Config::from_env(), Err(CacheError::Configuration(_))));

        env::set_var("CACHE_SIZE", "-3");
        assert!(matches!(Config::from_env(), Err(CacheError::Configuration(_))));

        clear_env();
        env::set_var("CACHE_TTL", "soon");
        assert!(matches!(Config::from_env(), Err(CacheError::Configuration(_))));

        clear_env();
    }
}
