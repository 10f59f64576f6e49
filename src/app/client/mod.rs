//! HTTP client for the materials catalog and supplier directory
//!
//! The module is organized into:
//! - `config`: HTTP client configuration and building
//! - `http`: core request handling with rate limiting
//!
//! Fetchers depend on the [`Upstream`] trait rather than on [`UpstreamClient`]
//! directly, so tests can substitute in-process sources.

use async_trait::async_trait;
use url::Url;

use crate::app::models::{Material, Supplier};
use crate::constants::upstream;
use crate::errors::{FetchError, FetchResult};

pub mod config;
pub mod http;

pub use config::ClientConfig;

use http::HttpHandler;

/// Source of raw upstream collections
///
/// Each call is one request against the corresponding endpoint.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// One call against the materials endpoint
    async fn fetch_materials(&self) -> FetchResult<Vec<Material>>;

    /// One call against the suppliers endpoint
    async fn fetch_suppliers(&self) -> FetchResult<Vec<Supplier>>;
}

/// Endpoint locations for the two upstream collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoints {
    pub materials: Url,
    pub suppliers: Url,
}

impl UpstreamEndpoints {
    /// Parse endpoint URLs
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` for an unparsable URL
    pub fn parse(materials: &str, suppliers: &str) -> FetchResult<Self> {
        Ok(Self {
            materials: parse_url(materials)?,
            suppliers: parse_url(suppliers)?,
        })
    }
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        Self::parse(upstream::MATERIALS_URL, upstream::SUPPLIERS_URL)
            .expect("Default endpoint URLs should be valid")
    }
}

fn parse_url(url: &str) -> FetchResult<Url> {
    Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        error: e.to_string(),
    })
}

/// HTTP implementation of [`Upstream`]
#[derive(Debug)]
pub struct UpstreamClient {
    http_handler: HttpHandler,
    endpoints: UpstreamEndpoints,
}

impl UpstreamClient {
    /// Creates a client for the default endpoints
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if HTTP client creation fails
    pub fn new() -> FetchResult<Self> {
        Self::with_config(ClientConfig::default(), UpstreamEndpoints::default())
    }

    /// Creates a client with custom configuration and endpoints
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if HTTP client creation fails or the rate limit is zero
    pub fn with_config(config: ClientConfig, endpoints: UpstreamEndpoints) -> FetchResult<Self> {
        let client = config.build_http_client()?;
        let http_handler = HttpHandler::new(client, config.rate_limit_rps)?;

        tracing::debug!(
            "Created upstream client (materials: {}, suppliers: {})",
            endpoints.materials,
            endpoints.suppliers
        );

        Ok(Self {
            http_handler,
            endpoints,
        })
    }

    /// Get the configured endpoints
    pub fn endpoints(&self) -> &UpstreamEndpoints {
        &self.endpoints
    }
}

#[async_trait]
impl Upstream for UpstreamClient {
    async fn fetch_materials(&self) -> FetchResult<Vec<Material>> {
        self.http_handler.get_json(&self.endpoints.materials).await
    }

    async fn fetch_suppliers(&self) -> FetchResult<Vec<Supplier>> {
        self.http_handler.get_json(&self.endpoints.suppliers).await
    }
}
