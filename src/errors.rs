//! Error types for Material Finder
//!
//! Errors are grouped by the component that produces them. Query-level
//! failures keep transport problems (`FetchError`) separate from the three
//! domain outcomes a caller may want to treat as "no answer" rather than
//! "broken".

use std::path::PathBuf;

use thiserror::Error;

/// Upstream fetch errors (network, status and decoding)
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("Server error: HTTP {status} from {url}")]
    ServerError { status: u16, url: String },

    /// Response body was not the expected JSON collection
    #[error("Failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid endpoint URL
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Rate limiter could not be built
    #[error("Invalid rate limiter configuration: {reason}")]
    RateLimiter { reason: String },
}

/// Errors returned by the best-material query and its components
#[derive(Error, Debug)]
pub enum QueryError {
    /// Either upstream could not be fetched or decoded
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The supplier directory has nobody in the requested locality
    #[error("No suppliers found in locality '{locality}'")]
    NoSuppliersInLocality { locality: String },

    /// The catalog has no material of the requested type
    #[error("No material of type '{material_type}' found in the catalog")]
    NoMatchingMaterial { material_type: String },

    /// Ranked materials and local suppliers share no stocked item
    #[error("No '{material_type}' material is stocked by a supplier in the requested locality")]
    NoMergedMatch { material_type: String },
}

impl QueryError {
    /// Stable identifier for the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Fetch(_) => "fetch",
            QueryError::NoSuppliersInLocality { .. } => "no_suppliers_in_locality",
            QueryError::NoMatchingMaterial { .. } => "no_matching_material",
            QueryError::NoMergedMatch { .. } => "no_merged_match",
        }
    }

    /// True for the "query had no answer" outcomes, false for transport failures
    pub fn is_empty_result(&self) -> bool {
        !matches!(self, QueryError::Fetch(_))
    }
}

/// Cache backend errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// I/O error in the on-disk store
    #[error("Cache I/O error")]
    Io(#[from] std::io::Error),

    /// Cache directory not found or inaccessible
    #[error("Cache directory not accessible: {path}")]
    DirectoryNotAccessible { path: PathBuf },

    /// Key cannot be mapped onto the backing store
    #[error("Invalid cache key: '{key}'")]
    InvalidKey { key: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Failed to render configuration")]
    Render(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// I/O error reading or writing a config file
    #[error("Configuration file I/O error")]
    Io(#[from] std::io::Error),

    /// No user configuration directory on this platform
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Query error
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Cache error
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output serialization error
    #[error("Failed to serialize output")]
    Output(#[from] serde_json::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl From<FetchError> for AppError {
    fn from(error: FetchError) -> Self {
        AppError::Query(QueryError::Fetch(error))
    }
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is transient and the query is worth re-running later
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Query(QueryError::Fetch(FetchError::Http(_)))
            | AppError::Query(QueryError::Fetch(FetchError::ServerError { .. })) => true,

            AppError::Query(QueryError::Fetch(FetchError::Decode { .. }))
            | AppError::Query(QueryError::Fetch(FetchError::InvalidUrl { .. }))
            | AppError::Config(_) => false,

            _ => false,
        }
    }

    /// Process exit status: 2 when the query had no answer, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Query(error) if error.is_empty_result() => 2,
            _ => 1,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Query(QueryError::Fetch(_)) => "upstream",
            AppError::Query(_) => "query",
            AppError::Cache(_) => "cache",
            AppError::Config(_) => "config",
            AppError::Output(_) => "output",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Query result type alias
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Cache result type alias
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
