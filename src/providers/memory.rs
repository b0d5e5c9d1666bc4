//! Memory Provider Module
//!
//! In-process [`CacheProvider`] holding JSON text with per-entry expiry.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheProvider, CacheStats};
use crate::error::Result;
use crate::providers::entry::MemoryEntry;

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, MemoryEntry>,
    stats: CacheStats,
}

// == Memory Provider ==
/// Map-backed provider with the same contract as the Redis adapter.
///
/// Expired entries read as absent and are removed lazily on access or by
/// [`cleanup_expired`](MemoryProvider::cleanup_expired).
#[derive(Debug, Default)]
pub struct MemoryProvider {
    inner: RwLock<Inner>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns current statistics.
    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.entries.len();
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - inner.entries.len();
        inner.stats.record_purged(removed);
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

#[async_trait]
impl CacheProvider for MemoryProvider {
    async fn set(&self, key: &str, value: &Value, ttl: u64) -> Result<()> {
        let text = serde_json::to_string(value)?;
        let mut inner = self.inner.write().await;
        inner
            .entries
            .insert(key.to_string(), MemoryEntry::new(text, ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut inner = self.inner.write().await;

        let expired = inner.entries.get(key).map(MemoryEntry::is_expired);
        let text = match expired {
            Some(false) => inner.entries.get(key).map(|entry| entry.value.clone()),
            Some(true) => {
                inner.entries.remove(key);
                None
            }
            None => None,
        };

        match text {
            Some(text) => {
                inner.stats.record_hit();
                Ok(Some(serde_json::from_str(&text)?))
            }
            None => {
                inner.stats.record_miss();
                Ok(None)
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.write().await.entries.remove(key);
        Ok(())
    }

    async fn flush(&self, prefix: &str) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - inner.entries.len();
        inner.stats.record_purged(removed);
        debug!(prefix, removed, "memory flush");
        Ok(removed as u64)
    }

    fn backend_type(&self) -> &'static str {
        "memory"
    }
}
