//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::parse_ttl;
use crate::error::CacheError;

/// Which provider backs the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Redis,
    Memory,
}

impl FromStr for Backend {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Backend::Redis),
            "memory" => Ok(Backend::Memory),
            other => Err(CacheError::Configuration(format!(
                "Unknown cache backend '{}', expected 'redis' or 'memory'",
                other
            ))),
        }
    }
}

/// Cache configuration parameters.
///
/// Optional values are left unset when the environment does not provide a
/// usable value, so the facade and provider apply their own fallbacks.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider backing the cache
    pub backend: Backend,
    /// Key namespace (facade falls back to "cache")
    pub prefix: Option<String>,
    /// Default TTL in seconds (facade falls back to 60)
    pub default_ttl: Option<u64>,
    /// Redis server host
    pub redis_host: Option<String>,
    /// Redis server port
    pub redis_port: Option<u16>,
    /// Redis password, may be empty but must be present
    pub redis_password: Option<String>,
    /// Expiry sweep interval in seconds for the memory backend
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `CACHE_PREFIX` - Key namespace
    /// - `CACHE_TTL` - Default TTL in seconds
    /// - `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD` - Redis connection
    /// - `CLEANUP_INTERVAL` - Memory backend sweep frequency (default: 1)
    ///
    /// Fails only when `CACHE_BACKEND` names an unknown backend.
    pub fn from_env() -> Result<Self, CacheError> {
        let backend = match env::var("CACHE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => Backend::default(),
        };

        Ok(Self {
            backend,
            prefix: env::var("CACHE_PREFIX").ok().filter(|v| !v.is_empty()),
            default_ttl: env::var("CACHE_TTL").ok().and_then(|v| parse_ttl(&v)),
            redis_host: env::var("REDIS_HOST").ok().filter(|v| !v.is_empty()),
            redis_port: env::var("REDIS_PORT").ok().and_then(|v| v.parse().ok()),
            redis_password: env::var("REDIS_PASSWORD").ok(),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Redis,
            prefix: None,
            default_ttl: None,
            redis_host: None,
            redis_port: None,
            redis_password: None,
            cleanup_interval: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "CACHE_BACKEND",
        "CACHE_PREFIX",
        "CACHE_TTL",
        "REDIS_HOST",
        "REDIS_PORT",
        "REDIS_PASSWORD",
        "CLEANUP_INTERVAL",
    ];

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::Redis);
        assert!(config.prefix.is_none());
        assert!(config.default_ttl.is_none());
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("redis".parse::<Backend>().unwrap(), Backend::Redis);
        assert_eq!(" Memory ".parse::<Backend>().unwrap(), Backend::Memory);
        assert!(matches!(
            "memcached".parse::<Backend>(),
            Err(CacheError::Configuration(_))
        ));
    }

    // Single test touching the environment so parallel tests cannot race.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.backend, Backend::Redis);
        assert!(config.prefix.is_none());
        assert!(config.default_ttl.is_none());
        assert!(config.redis_password.is_none());

        env::set_var("CACHE_BACKEND", "memory");
        env::set_var("CACHE_PREFIX", "p2");
        env::set_var("CACHE_TTL", "ahjk");
        env::set_var("REDIS_HOST", "127.0.0.1");
        env::set_var("REDIS_PORT", "6380");
        env::set_var("REDIS_PASSWORD", "");
        env::set_var("CLEANUP_INTERVAL", "5");

        let config = Config::from_env().unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.prefix.as_deref(), Some("p2"));
        assert!(config.default_ttl.is_none(), "non-numeric TTL is dropped");
        assert_eq!(config.redis_host.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.redis_port, Some(6380));
        assert_eq!(config.redis_password.as_deref(), Some(""));
        assert_eq!(config.cleanup_interval, 5);

        env::set_var("CACHE_TTL", "35");
        assert_eq!(Config::from_env().unwrap().default_ttl, Some(35));

        env::set_var("CACHE_BACKEND", "bogus");
        assert!(Config::from_env().is_err());

        for var in VARS {
            env::remove_var(var);
        }
    }
}
