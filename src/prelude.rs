//! Prelude module for Material Finder Library
//!
//! Re-exports the items needed for typical library usage with a single
//! `use material_finder::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use material_finder::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let upstream = Arc::new(UpstreamClient::new()?);
//!     let cache = build_cache(&CacheConfig::default()).await?;
//!     let service = BestMaterialQueryService::new(upstream, cache);
//!
//!     let matches = service
//!         .find_best_material(&MaterialQuery::new("steel", 100.0, "Munich"))
//!         .await?;
//!     println!("{} matches", matches.len());
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, FetchError, QueryError, Result};

// Components used in most integrations
pub use crate::app::{
    build_cache, BestMaterialMatch, BestMaterialQueryService, CacheBackend, CacheConfig,
    ClientConfig, KeyValueCache, Material, MaterialQuery, Supplier, Upstream, UpstreamClient,
    UpstreamEndpoints,
};

pub use crate::config::AppConfig;
