//! Expiry Sweep Task
//!
//! Background task that periodically purges expired entries from the
//! in-memory provider. Reads already treat expired entries as absent; the
//! sweep only reclaims memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::providers::MemoryProvider;

/// Spawns a task that calls [`MemoryProvider::cleanup_expired`] every
/// `cleanup_interval_secs` seconds.
///
/// Returns the task handle so callers can abort it on shutdown.
///
/// # Example
/// ```ignore
/// let provider = Arc::new(MemoryProvider::new());
/// let handle = spawn_cleanup_task(provider.clone(), 1);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task(
    provider: Arc<MemoryProvider>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = provider.cleanup_expired().await;
            let stats = provider.stats().await;
            if removed > 0 {
                info!(
                    entries = stats.total_entries,
                    hit_rate = stats.hit_rate(),
                    "Expiry sweep: removed {} expired entries",
                    removed
                );
            } else {
                debug!(
                    entries = stats.total_entries,
                    hit_rate = stats.hit_rate(),
                    "Expiry sweep: no expired entries found"
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheProvider;
    use serde_json::json;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let provider = Arc::new(MemoryProvider::new());
        provider
            .set("cache-expire_soon", &json!("value"), 1)
            .await
            .unwrap();

        let handle = spawn_cleanup_task(provider.clone(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(provider.len().await, 0, "Expired entry should have been swept");
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let provider = Arc::new(MemoryProvider::new());
        provider
            .set("cache-long_lived", &json!("value"), 3600)
            .await
            .unwrap();

        let handle = spawn_cleanup_task(provider.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(
            provider.get("cache-long_lived").await.unwrap(),
            Some(json!("value"))
        );
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(Arc::new(MemoryProvider::new()), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
