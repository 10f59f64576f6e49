//! Cache configuration types and defaults

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::cache;

/// Which store backs the catalog cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local store; lost on exit
    Memory,
    /// Files under `cache_root`; shared between runs
    #[default]
    Disk,
    /// Never hits
    None,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheBackend::Memory => "memory",
            CacheBackend::Disk => "disk",
            CacheBackend::None => "none",
        };
        f.write_str(name)
    }
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(CacheBackend::Memory),
            "disk" => Ok(CacheBackend::Disk),
            "none" => Ok(CacheBackend::None),
            other => Err(format!(
                "unknown cache backend '{}', expected memory, disk or none",
                other
            )),
        }
    }
}

/// Configuration for the catalog cache
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// Lifetime of an entry from time of write
    pub ttl: Duration,
    /// Root directory for the disk backend (OS cache dir if None)
    pub cache_root: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            ttl: cache::DEFAULT_TTL,
            cache_root: None,
        }
    }
}

impl CacheConfig {
    /// Disk cache rooted at `cache_root`
    pub fn with_cache_root(cache_root: PathBuf) -> Self {
        Self {
            cache_root: Some(cache_root),
            ..Default::default()
        }
    }

    pub fn with_backend(mut self, backend: CacheBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.backend, CacheBackend::Disk);
        assert_eq!(config.ttl, Duration::from_secs(600 * 60));
        assert_eq!(config.cache_root, None);
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::with_cache_root(PathBuf::from("/tmp/test"))
            .with_backend(CacheBackend::Memory)
            .with_ttl(Duration::from_secs(60));

        assert_eq!(config.cache_root, Some(PathBuf::from("/tmp/test")));
        assert_eq!(config.backend, CacheBackend::Memory);
        assert_eq!(config.ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("memory".parse::<CacheBackend>(), Ok(CacheBackend::Memory));
        assert_eq!("disk".parse::<CacheBackend>(), Ok(CacheBackend::Disk));
        assert_eq!("none".parse::<CacheBackend>(), Ok(CacheBackend::None));
        assert!("redis".parse::<CacheBackend>().is_err());
        assert_eq!(CacheBackend::Memory.to_string(), "memory");
    }
}
