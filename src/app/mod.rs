//! Core application logic for Material Finder
//!
//! This module contains the upstream client, data models, catalog cache,
//! the two fetchers, the matching engine and the query service that ties
//! them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use material_finder::app::{
//!     build_cache, BestMaterialQueryService, CacheConfig, MaterialQuery, UpstreamClient,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let upstream = Arc::new(UpstreamClient::new()?);
//! let cache = build_cache(&CacheConfig::default()).await?;
//! let service = BestMaterialQueryService::new(upstream, cache);
//!
//! let query = MaterialQuery::new("steel", 250.0, "Munich");
//! for found in service.find_best_material(&query).await? {
//!     println!(
//!         "{} from {}",
//!         found.material.material_name, found.supplier.supplier_name
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod catalog;
pub mod client;
pub mod matching;
pub mod models;
pub mod service;
pub mod suppliers;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main public API
pub use cache::{
    build_cache, CacheBackend, CacheConfig, DiskCache, KeyValueCache, MemoryCache, NoopCache,
};
pub use catalog::MaterialCatalogFetcher;
pub use client::{ClientConfig, Upstream, UpstreamClient, UpstreamEndpoints};
pub use matching::{compare_rank, MatchingEngine};
pub use models::{
    BestMaterialMatch, Material, MaterialQuery, StockDetail, Supplier, SupplierSummary,
};
pub use service::BestMaterialQueryService;
pub use suppliers::{filter_by_locality, SupplierDirectoryFetcher};
