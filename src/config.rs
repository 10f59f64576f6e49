//! Configuration management for Material Finder
//!
//! Configuration is layered: built-in defaults, then a TOML file (explicit
//! path or the first one found in the standard locations), then environment
//! variable overrides for the upstream endpoints. Every section may be
//! omitted or partially specified.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{CacheBackend, CacheConfig, ClientConfig, UpstreamEndpoints};
use crate::constants::{cache, env, http, limits, upstream};
use crate::errors::{ConfigError, ConfigResult};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream endpoints and fetch policy
    pub upstream: UpstreamConfigToml,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Catalog cache settings
    pub cache: CacheConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Upstream endpoints and fetch policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfigToml {
    pub materials_url: String,
    pub suppliers_url: String,
    /// Catalog responses concatenated on a cache miss
    pub catalog_rounds: usize,
}

impl Default for UpstreamConfigToml {
    fn default() -> Self {
        Self {
            materials_url: upstream::MATERIALS_URL.to_string(),
            suppliers_url: upstream::SUPPLIERS_URL.to_string(),
            catalog_rounds: upstream::CATALOG_ROUNDS,
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// TCP keep-alive in seconds (None = disabled)
    pub tcp_keepalive_secs: Option<u64>,
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
    pub pool_max_per_host: usize,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Requests per second
    pub rate_limit_rps: u32,
    pub user_agent: String,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            tcp_keepalive_secs: Some(30),
            tcp_nodelay: true,
            pool_idle_timeout_secs: Some(http::POOL_IDLE_TIMEOUT.as_secs()),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            user_agent: http::USER_AGENT.to_string(),
        }
    }
}

/// TOML-friendly cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfigToml {
    pub backend: CacheBackend,
    /// Entry lifetime, e.g. "600m" or "10h"
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
    /// Directory for the disk backend (system cache dir if unset)
    pub cache_root: Option<PathBuf>,
}

impl Default for CacheConfigToml {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            ttl: cache::DEFAULT_TTL,
            cache_root: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (if exists)
    /// 3. Environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an explicitly given file is missing, a file
    /// cannot be parsed, or the result fails validation
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        if let Some(path) = config_path {
            config = Self::load_from_file(&path).await?;
        }

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override endpoints from environment-style variables
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env::MATERIALS_URL) {
            debug!("Materials endpoint overridden by {}", env::MATERIALS_URL);
            self.upstream.materials_url = url;
        }
        if let Some(url) = lookup(env::SUPPLIERS_URL) {
            debug!("Suppliers endpoint overridden by {}", env::SUPPLIERS_URL);
            self.upstream.suppliers_url = url;
        }
    }

    /// Reject values that cannot produce a working runtime configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.upstream.catalog_rounds == 0 {
            return Err(invalid(
                "upstream.catalog_rounds",
                "0",
                "At least one catalog call is required",
            ));
        }
        if self.client.rate_limit_rps == 0 {
            return Err(invalid(
                "client.rate_limit_rps",
                "0",
                "Rate limit must be non-zero",
            ));
        }
        if self.cache.ttl.is_zero() {
            return Err(invalid(
                "cache.ttl",
                "0s",
                "Use backend = \"none\" to disable caching",
            ));
        }
        self.endpoints()?;
        Ok(())
    }

    /// Parsed upstream endpoints
    pub fn endpoints(&self) -> ConfigResult<UpstreamEndpoints> {
        UpstreamEndpoints::parse(&self.upstream.materials_url, &self.upstream.suppliers_url)
            .map_err(|e| {
                invalid(
                    "upstream",
                    &format!("{} / {}", self.upstream.materials_url, self.upstream.suppliers_url),
                    &e.to_string(),
                )
            })
    }

    /// Runtime HTTP client configuration
    pub fn client_config(&self) -> ClientConfig {
        self.client.to_runtime_config()
    }

    /// Runtime cache configuration
    pub fn cache_config(&self) -> CacheConfig {
        self.cache.to_runtime_config()
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write a commented default configuration file
    ///
    /// Writes to `path`, or to the user config directory when `None`.
    /// Refuses to overwrite an existing file unless `force` is set.
    pub async fn initialize(path: Option<PathBuf>, force: bool) -> ConfigResult<PathBuf> {
        let config_path = match path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        if config_path.exists() && !force {
            return Err(invalid(
                "config file",
                &config_path.display().to_string(),
                "File already exists, pass --force to overwrite",
            ));
        }

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&config_path, Self::generate_default_config_content()).await?;
        info!("Wrote default configuration to {}", config_path.display());
        Ok(config_path)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![
            PathBuf::from("./material-finder.toml"),
            PathBuf::from("./config.toml"),
        ];
        if let Ok(path) = Self::default_config_path() {
            search_paths.push(path);
        }
        #[cfg(unix)]
        search_paths.push(PathBuf::from("/etc/material-finder/config.toml"));

        for path in search_paths {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        debug!("No config file found in standard locations");
        None
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(cache::APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# Material Finder Configuration
# You can customize any of these settings to suit your needs.

[upstream]
materials_url = "{}"
suppliers_url = "{}"
# Catalog responses concatenated on a cache miss
catalog_rounds = {}

[client]
tcp_keepalive_secs = 30
tcp_nodelay = true
pool_idle_timeout_secs = {}
pool_max_per_host = {}
request_timeout_secs = {}
connect_timeout_secs = {}
rate_limit_rps = {}

[cache]
# memory, disk or none
backend = "disk"
# Lifetime of the cached catalog
ttl = "600m"
# cache_root = "/path/to/custom/cache"

[logging]
level = "warn"  # error, warn, info, debug, trace
"#,
            upstream::MATERIALS_URL,
            upstream::SUPPLIERS_URL,
            upstream::CATALOG_ROUNDS,
            http::POOL_IDLE_TIMEOUT.as_secs(),
            http::POOL_MAX_PER_HOST,
            http::DEFAULT_TIMEOUT.as_secs(),
            http::CONNECT_TIMEOUT.as_secs(),
            limits::DEFAULT_RATE_LIMIT_RPS,
        )
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            tcp_keepalive: self.tcp_keepalive_secs.map(Duration::from_secs),
            tcp_nodelay: self.tcp_nodelay,
            pool_idle_timeout: self.pool_idle_timeout_secs.map(Duration::from_secs),
            pool_max_per_host: self.pool_max_per_host,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            rate_limit_rps: self.rate_limit_rps,
            user_agent: self.user_agent.clone(),
        }
    }
}

impl CacheConfigToml {
    /// Convert to runtime CacheConfig
    pub fn to_runtime_config(&self) -> CacheConfig {
        CacheConfig {
            backend: self.backend,
            ttl: self.ttl,
            cache_root: self.cache_root.clone(),
        }
    }
}
