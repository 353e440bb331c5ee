//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired response-cache entries.
//! Expiry is already enforced lazily on lookup; the sweep just keeps stale
//! entries from sitting in memory between accesses.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a background task that periodically removes expired cache entries.
///
/// # Arguments
/// * `cache` - Shared response cache
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during graceful
/// shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<Mutex<ResponseCache>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache = cache.lock().await;
                cache.sweep_expired()
            };

            if removed > 0 {
                info!("TTL cleanup: removed {} expired responses", removed);
            } else {
                debug!("TTL cleanup: no expired responses found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    #[tokio::test]
    async fn test_cleanup_removes_expired_entries() {
        let clock = Arc::new(ManualClock::at(0));
        let cache = Arc::new(Mutex::new(ResponseCache::with_clock(16, 60, clock.clone())));

        {
            let mut cache = cache.lock().await;
            cache.store("stale".to_string(), Ok(Vec::new()));
        }
        clock.advance_ms(61_000);

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let cache = cache.lock().await;
            assert!(cache.is_empty(), "expired entry should have been swept");
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_preserves_valid_entries() {
        let clock = Arc::new(ManualClock::at(0));
        let cache = Arc::new(Mutex::new(ResponseCache::with_clock(16, 60, clock)));

        {
            let mut cache = cache.lock().await;
            cache.store("fresh".to_string(), Ok(Vec::new()));
        }

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let cache = cache.lock().await;
            assert_eq!(cache.len(), 1, "valid entry should survive the sweep");
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(Mutex::new(ResponseCache::new(16, 60)));

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "task should be finished after abort");
    }
}
