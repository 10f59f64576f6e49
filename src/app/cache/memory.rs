//! Process-local cache store backed by `moka`

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::errors::CacheResult;

use super::KeyValueCache;

/// Upper bound on stored keys; the catalog uses one
const MAX_ENTRIES: u64 = 64;

/// In-memory key/value store with a fixed time-to-live
///
/// Expiry is measured from the last write. Each `set` replaces the whole
/// value, so readers see either the previous value or the new one.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    ttl: Duration,
    entries: Cache<String, Vec<u8>>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self { ttl, entries }
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count() as usize
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        if self.ttl.is_zero() {
            return Ok(None);
        }
        let value = self.entries.get(key).await;
        if value.is_none() {
            debug!("Memory cache miss for '{}'", key);
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> CacheResult<()> {
        self.entries.insert(key.to_string(), value.to_vec()).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<bool> {
        Ok(self.entries.remove(key).await.is_some())
    }

    async fn clear(&self) -> CacheResult<usize> {
        let removed = self.len().await;
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        Ok(removed)
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
