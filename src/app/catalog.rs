//! Material catalog fetching with a time-bounded cache
//!
//! A cache hit returns the stored snapshot without contacting upstream. On a
//! miss the materials endpoint is called a fixed number of times (five by
//! default) and every response is concatenated in call order; the combined
//! catalog then replaces the cached snapshot. Cache failures never fail a
//! fetch: unreadable entries count as misses and failed writes are logged.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::cache::KeyValueCache;
use crate::app::client::Upstream;
use crate::app::models::Material;
use crate::constants::{cache, CATALOG_ROUNDS};
use crate::errors::FetchResult;

/// Fetches the full material catalog, cache first
pub struct MaterialCatalogFetcher {
    upstream: Arc<dyn Upstream>,
    cache: Arc<dyn KeyValueCache>,
    rounds: usize,
}

impl MaterialCatalogFetcher {
    pub fn new(upstream: Arc<dyn Upstream>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self {
            upstream,
            cache,
            rounds: CATALOG_ROUNDS,
        }
    }

    /// Number of upstream responses concatenated on a miss
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The shared cache handle
    pub fn cache(&self) -> &Arc<dyn KeyValueCache> {
        &self.cache
    }

    /// Return the catalog from cache, or fetch and cache it
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if any upstream call fails or cannot be decoded.
    /// Nothing is cached in that case.
    pub async fn fetch(&self) -> FetchResult<Vec<Material>> {
        if let Some(materials) = self.read_cached().await {
            return Ok(materials);
        }

        let materials = self.fetch_upstream().await?;
        self.write_cached(&materials).await;
        Ok(materials)
    }

    async fn read_cached(&self) -> Option<Vec<Material>> {
        match self.cache.get(cache::MATERIALS_KEY).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Material>>(&bytes) {
                Ok(materials) => {
                    debug!("Catalog cache hit ({} materials)", materials.len());
                    Some(materials)
                }
                Err(e) => {
                    warn!("Discarding undecodable catalog cache entry: {}", e);
                    None
                }
            },
            Ok(None) => {
                debug!("Catalog cache miss");
                None
            }
            Err(e) => {
                warn!("Catalog cache read failed, fetching upstream: {}", e);
                None
            }
        }
    }

    async fn fetch_upstream(&self) -> FetchResult<Vec<Material>> {
        let mut materials = Vec::new();
        for round in 1..=self.rounds {
            let batch = self.upstream.fetch_materials().await?;
            debug!(
                "Catalog round {}/{} returned {} materials",
                round,
                self.rounds,
                batch.len()
            );
            materials.extend(batch);
        }
        info!(
            "Fetched {} materials from upstream in {} rounds",
            materials.len(),
            self.rounds
        );
        Ok(materials)
    }

    async fn write_cached(&self, materials: &[Material]) {
        let bytes = match serde_json::to_vec(materials) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to serialize catalog for caching: {}", e);
                return;
            }
        };

        if let Err(e) = self.cache.set(cache::MATERIALS_KEY, &bytes).await {
            warn!("Failed to cache catalog, next fetch will go upstream: {}", e);
        }
    }
}
