//! On-disk cache store with atomic writes
//!
//! Each key is one file under the cache root. Writes go to a uniquely named
//! temporary file which is then renamed over the entry, so a concurrent
//! reader sees either the previous complete value or the new one. Expiry is
//! measured from the entry file's modification time.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::fs;
use tracing::{debug, error, info};

use crate::constants::cache;
use crate::errors::{CacheError, CacheResult};

use super::KeyValueCache;

/// Metadata about one stored entry
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInfo {
    pub key: String,
    pub size_bytes: u64,
    pub written_at: DateTime<Local>,
    pub expired: bool,
}

/// File-backed key/value store with a fixed time-to-live
#[derive(Debug)]
pub struct DiskCache {
    cache_root: PathBuf,
    ttl: Duration,
    temp_counter: AtomicU64,
}

impl DiskCache {
    /// Create a disk cache, creating the root directory if needed
    ///
    /// # Errors
    ///
    /// Returns `CacheError::DirectoryNotAccessible` if the directory cannot be
    /// determined or created
    pub async fn new(cache_root: Option<PathBuf>, ttl: Duration) -> CacheResult<Self> {
        let cache_root = match cache_root {
            Some(path) => path,
            None => Self::default_cache_dir()?,
        };

        Self::ensure_directory_exists(&cache_root).await?;

        info!("Initialized disk cache with root: {}", cache_root.display());

        Ok(Self {
            cache_root,
            ttl,
            temp_counter: AtomicU64::new(0),
        })
    }

    /// Get the cache root directory
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Platform cache directory:
    /// - Linux: ~/.cache/material-finder
    /// - macOS: ~/Library/Caches/material-finder
    /// - Windows: %LOCALAPPDATA%/material-finder
    pub fn default_cache_dir() -> CacheResult<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| CacheError::DirectoryNotAccessible {
                path: PathBuf::from("system cache directory"),
            })?
            .join(cache::APP_DIR_NAME);

        Ok(cache_dir)
    }

    async fn ensure_directory_exists(path: &Path) -> CacheResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).await.map_err(|e| {
                error!("Failed to create cache directory: {}", e);
                CacheError::DirectoryNotAccessible {
                    path: path.to_path_buf(),
                }
            })?;
            debug!("Created cache directory: {}", path.display());
        }
        Ok(())
    }

    fn entry_path(&self, key: &str) -> CacheResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CacheError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self
            .cache_root
            .join(format!("{}.{}", key, cache::ENTRY_EXTENSION)))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        let n = self.temp_counter.fetch_add(1, Ordering::Relaxed);
        self.cache_root.join(format!(
            "{}.{}.{}{}",
            key,
            std::process::id(),
            n,
            cache::TEMP_FILE_SUFFIX
        ))
    }

    fn age(modified: SystemTime) -> Duration {
        SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO)
    }

    /// List stored entries with their age status
    pub async fn entries(&self) -> CacheResult<Vec<EntryInfo>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.cache_root).await?;

        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some(cache::ENTRY_EXTENSION) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let metadata = item.metadata().await?;
            let modified = metadata.modified()?;
            entries.push(EntryInfo {
                key: key.to_string(),
                size_bytes: metadata.len(),
                written_at: DateTime::<Local>::from(modified),
                expired: Self::age(modified) >= self.ttl,
            });
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}

#[async_trait]
impl KeyValueCache for DiskCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let path = self.entry_path(key)?;

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if Self::age(metadata.modified()?) >= self.ttl {
            debug!("Disk cache entry '{}' expired", key);
            return Ok(None);
        }

        match fs::read(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> CacheResult<()> {
        let final_path = self.entry_path(key)?;
        let temp_path = self.temp_path(key);

        Self::ensure_directory_exists(&self.cache_root).await?;

        fs::write(&temp_path, value).await.map_err(|e| {
            error!("Failed to write temporary cache file: {}", e);
            CacheError::Io(e)
        })?;

        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            error!("Failed to rename temporary cache file: {}", e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(CacheError::Io(e));
        }

        debug!(
            "Stored {} bytes under '{}' at {}",
            value.len(),
            key,
            final_path.display()
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<bool> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self) -> CacheResult<usize> {
        let mut removed = 0;
        let mut dir = fs::read_dir(&self.cache_root).await?;

        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            let name = item.file_name();
            let name = name.to_string_lossy();
            let is_entry =
                path.extension().and_then(|e| e.to_str()) == Some(cache::ENTRY_EXTENSION);
            let is_temp = name.ends_with(cache::TEMP_FILE_SUFFIX);

            if is_entry || is_temp {
                fs::remove_file(&path).await?;
                if is_entry {
                    removed += 1;
                }
            }
        }

        info!("Cleared {} cache entries from {}", removed, self.cache_root.display());
        Ok(removed)
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_cache(ttl: Duration) -> (TempDir, DiskCache) {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::new(Some(temp_dir.path().to_path_buf()), ttl)
            .await
            .unwrap();
        (temp_dir, cache)
    }

    #[tokio::test]
    async fn test_cache_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("cache");

        let cache = DiskCache::new(Some(root.clone()), Duration::from_secs(60))
            .await
            .unwrap();

        assert!(root.exists());
        assert_eq!(cache.cache_root(), root.as_path());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (_temp_dir, cache) = create_cache(Duration::from_secs(60)).await;

        cache.set("materials", b"[1,2,3]").await.unwrap();

        assert_eq!(
            cache.get("materials").await.unwrap(),
            Some(b"[1,2,3]".to_vec())
        );
        assert!(cache.cache_root().join("materials.json").exists());
    }

    #[tokio::test]
    async fn test_missing_key_is_miss() {
        let (_temp_dir, cache) = create_cache(Duration::from_secs(60)).await;
        assert_eq!(cache.get("materials").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_files() {
        let (_temp_dir, cache) = create_cache(Duration::from_secs(60)).await;

        cache.set("materials", b"old").await.unwrap();
        cache.set("materials", b"new").await.unwrap();

        assert_eq!(cache.get("materials").await.unwrap(), Some(b"new".to_vec()));

        let mut names = Vec::new();
        let mut dir = fs::read_dir(cache.cache_root()).await.unwrap();
        while let Some(item) = dir.next_entry().await.unwrap() {
            names.push(item.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names, vec!["materials.json".to_string()]);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_misses() {
        let (_temp_dir, cache) = create_cache(Duration::ZERO).await;
        cache.set("materials", b"[]").await.unwrap();
        assert_eq!(cache.get("materials").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_keys_rejected() {
        let (_temp_dir, cache) = create_cache(Duration::from_secs(60)).await;

        for key in ["", "../escape", "a/b", "with space"] {
            assert!(matches!(
                cache.set(key, b"x").await,
                Err(CacheError::InvalidKey { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_entries_and_clear() {
        let (_temp_dir, cache) = create_cache(Duration::from_secs(60)).await;
        cache.set("materials", b"[]").await.unwrap();
        cache.set("other", b"12345").await.unwrap();

        let entries = cache.entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "materials");
        assert_eq!(entries[1].size_bytes, 5);
        assert!(entries.iter().all(|e| !e.expired));

        assert_eq!(cache.clear().await.unwrap(), 2);
        assert!(cache.entries().await.unwrap().is_empty());
        assert!(!cache.remove("materials").await.unwrap());
    }

    #[tokio::test]
    async fn test_entries_survive_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        let first = DiskCache::new(Some(root.clone()), Duration::from_secs(60))
            .await
            .unwrap();
        first.set("materials", b"[]").await.unwrap();

        let second = DiskCache::new(Some(root), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(second.get("materials").await.unwrap(), Some(b"[]".to_vec()));
    }
}
