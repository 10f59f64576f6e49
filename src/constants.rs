//! Application constants for Material Finder
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names for endpoint overrides
pub mod env {
    /// Overrides the materials endpoint
    pub const MATERIALS_URL: &str = "MATERIAL_FINDER_MATERIALS_URL";

    /// Overrides the suppliers endpoint
    pub const SUPPLIERS_URL: &str = "MATERIAL_FINDER_SUPPLIERS_URL";
}

/// Upstream service endpoints and fetch policy
pub mod upstream {
    /// Materials catalog endpoint
    pub const MATERIALS_URL: &str = "https://jgpjqcuk9e.execute-api.us-east-2.amazonaws.com/materials";

    /// Supplier directory endpoint
    pub const SUPPLIERS_URL: &str = "https://jgpjqcuk9e.execute-api.us-east-2.amazonaws.com/suppliers";

    /// Number of catalog responses concatenated on a cache miss
    pub const CATALOG_ROUNDS: usize = 5;
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "Material-Finder/0.1.0";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// Rate limiting configuration
pub mod limits {
    /// Default client-side rate limit for upstream requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 10;
}

/// Catalog cache constants
pub mod cache {
    use super::Duration;

    /// Cache key holding the serialized material catalog
    pub const MATERIALS_KEY: &str = "materials";

    /// Lifetime of a cache entry from time of write (600 minutes)
    pub const DEFAULT_TTL: Duration = Duration::from_secs(600 * 60);

    /// File extension for on-disk entries
    pub const ENTRY_EXTENSION: &str = "json";

    /// Temporary file suffix for atomic writes
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";

    /// Directory name used under the platform cache/config dirs
    pub const APP_DIR_NAME: &str = "material-finder";
}

// Re-exports for backward compatibility with flat imports
pub use cache::{DEFAULT_TTL, MATERIALS_KEY};
pub use http::USER_AGENT;
pub use limits::DEFAULT_RATE_LIMIT_RPS;
pub use upstream::CATALOG_ROUNDS;
