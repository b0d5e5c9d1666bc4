//! Cache Provider Module
//!
//! The backend-facing contract consumed by [`Cache`](crate::cache::Cache).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

// == Cache Provider ==
/// Capability contract every cache backend implements.
///
/// All keys are effective keys: the provider never sees the logical key or
/// the prefix separately, except for `flush`, which receives the prefix.
///
/// # Implementations
///
/// - [`RedisProvider`](crate::providers::RedisProvider): remote key-value store
/// - [`MemoryProvider`](crate::providers::MemoryProvider): in-process map
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Stores `value` under `key`, expiring after `ttl` seconds.
    async fn set(&self, key: &str, value: &Value, ttl: u64) -> Result<()>;

    /// Fetches the value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Removes `key`. Succeeds whether or not the key existed.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes every entry whose key starts with `prefix` and returns how
    /// many were removed.
    ///
    /// Enumeration and deletion are separate steps: keys written under the
    /// prefix between the two steps survive the flush.
    async fn flush(&self, prefix: &str) -> Result<u64>;

    /// Short backend name for logging.
    fn backend_type(&self) -> &'static str;
}
