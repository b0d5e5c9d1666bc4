//! Cache Facade Module
//!
//! Namespaces keys and resolves TTLs on top of an injected provider.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::key::make_key;
use crate::cache::provider::CacheProvider;
use crate::cache::ttl::{resolve_ttl, DEFAULT_TTL};
use crate::config::{Backend, Config};
use crate::error::{CacheError, Result};
use crate::providers::{ConnectionOptions, MemoryProvider, RedisProvider};

/// Namespace used when no prefix is configured.
pub const DEFAULT_PREFIX: &str = "cache";

// == Cache Options ==
/// Construction options for [`Cache`].
#[derive(Debug, Clone, Default)]
pub struct CacheOptions {
    /// Default TTL in seconds; absent or zero falls back to 60
    pub ttl: Option<u64>,
    /// Key namespace; absent or empty falls back to "cache"
    pub prefix: Option<String>,
}

// == Cache ==
/// Namespaced cache over any [`CacheProvider`].
///
/// Prefix and default TTL are fixed at construction. Provider errors are
/// returned unchanged.
#[derive(Clone)]
pub struct Cache {
    provider: Arc<dyn CacheProvider>,
    prefix: String,
    ttl: u64,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("backend", &self.provider.backend_type())
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl Cache {
    // == Constructor ==
    /// Creates a cache over `provider`, resolving the options.
    pub fn new(provider: Arc<dyn CacheProvider>, options: CacheOptions) -> Self {
        let ttl = resolve_ttl(options.ttl, DEFAULT_TTL);
        let prefix = options
            .prefix
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        debug!(
            backend = provider.backend_type(),
            prefix = %prefix,
            ttl,
            "cache created"
        );

        Self {
            provider,
            prefix,
            ttl,
        }
    }

    /// Starts a [`CacheBuilder`].
    pub fn builder() -> CacheBuilder {
        CacheBuilder::default()
    }

    /// Builds the provider named in `config` and wraps it.
    ///
    /// The Redis backend requires host, port and password; missing any is a
    /// configuration error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider: Arc<dyn CacheProvider> = match config.backend {
            Backend::Redis => {
                let options = ConnectionOptions {
                    host: config.redis_host.clone(),
                    port: config.redis_port,
                    password: config.redis_password.clone(),
                };
                Arc::new(RedisProvider::new(options)?)
            }
            Backend::Memory => Arc::new(MemoryProvider::new()),
        };

        info!(backend = provider.backend_type(), "cache provider configured");

        Cache::builder()
            .provider(provider)
            .options(CacheOptions {
                ttl: config.default_ttl,
                prefix: config.prefix.clone(),
            })
            .build()
    }

    // == Accessors ==
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Default TTL in seconds applied when `set` gets no override.
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    pub fn provider(&self) -> &Arc<dyn CacheProvider> {
        &self.provider
    }

    // == Set ==
    /// Stores `value` under the namespaced `key`.
    ///
    /// `ttl` overrides the default when present and non-zero.
    pub async fn set<T>(&self, key: &str, value: &T, ttl: Option<u64>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        self.provider
            .set(&make_key(&self.prefix, key), &value, resolve_ttl(ttl, self.ttl))
            .await
    }

    // == Get ==
    /// Fetches the value under the namespaced `key`, `None` if absent.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.provider.get(&make_key(&self.prefix, key)).await
    }

    /// Fetches and deserializes the value under `key` into `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    // == Delete ==
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.provider.delete(&make_key(&self.prefix, key)).await
    }

    // == Flush ==
    /// Removes every entry under this instance's prefix.
    ///
    /// Not atomic; see [`CacheProvider::flush`].
    pub async fn flush(&self) -> Result<u64> {
        self.provider.flush(&self.prefix).await
    }
}

// == Cache Builder ==
/// Builder that fails fast when no provider was supplied.
#[derive(Default)]
pub struct CacheBuilder {
    provider: Option<Arc<dyn CacheProvider>>,
    options: CacheOptions,
}

impl CacheBuilder {
    pub fn provider(mut self, provider: Arc<dyn CacheProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn options(mut self, options: CacheOptions) -> Self {
        self.options = options;
        self
    }

    pub fn ttl(mut self, ttl: u64) -> Self {
        self.options.ttl = Some(ttl);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = Some(prefix.into());
        self
    }

    /// Builds the cache or returns [`CacheError::Configuration`] if no
    /// provider was set.
    pub fn build(self) -> Result<Cache> {
        let provider = self.provider.ok_or_else(|| {
            CacheError::Configuration("Please provide a valid cache provider".to_string())
        })?;
        Ok(Cache::new(provider, self.options))
    }
}
