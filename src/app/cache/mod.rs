//! Key/value cache used for the material catalog snapshot
//!
//! The catalog fetcher depends only on the [`KeyValueCache`] trait; the
//! concrete store is chosen from configuration and shared as
//! `Arc<dyn KeyValueCache>` across concurrent queries.
//!
//! # Module Organization
//!
//! - [`config`] - Backend selection, TTL and location
//! - [`memory`] - Process-local store
//! - [`disk`] - File-per-key store with atomic temp-file + rename writes
//!
//! Every store applies one fixed TTL, set at construction, measured from the
//! time an entry was written. Single-key reads and writes are atomic.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::CacheResult;

pub mod config;
pub mod disk;
pub mod memory;

pub use config::{CacheBackend, CacheConfig};
pub use disk::{DiskCache, EntryInfo};
pub use memory::MemoryCache;

/// Byte-valued store with a fixed expiry
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Value under `key`, or `None` if absent or expired
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &[u8]) -> CacheResult<()>;

    /// Remove `key`; returns whether an entry existed
    async fn remove(&self, key: &str) -> CacheResult<bool>;

    /// Remove every entry; returns how many were removed
    async fn clear(&self) -> CacheResult<usize>;

    /// Lifetime applied to every entry
    fn ttl(&self) -> Duration;
}

/// A store that never holds anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl KeyValueCache for NoopCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &[u8]) -> CacheResult<()> {
        Ok(())
    }

    async fn remove(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn clear(&self) -> CacheResult<usize> {
        Ok(0)
    }

    fn ttl(&self) -> Duration {
        Duration::ZERO
    }
}

/// Build the configured store
///
/// # Errors
///
/// Returns `CacheError` if the disk store's directory cannot be created
pub async fn build_cache(config: &CacheConfig) -> CacheResult<Arc<dyn KeyValueCache>> {
    let cache: Arc<dyn KeyValueCache> = match config.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new(config.ttl)),
        CacheBackend::Disk => Arc::new(DiskCache::new(config.cache_root.clone(), config.ttl).await?),
        CacheBackend::None => Arc::new(NoopCache),
    };
    tracing::debug!(
        "Using {} cache backend (ttl {}s)",
        config.backend,
        config.ttl.as_secs()
    );
    Ok(cache)
}
