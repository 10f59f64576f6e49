//! Best-material query orchestration
//!
//! Runs the catalog fetch, then the supplier fetch, then ranking and the
//! join. The first failure is returned unchanged.

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::cache::KeyValueCache;
use crate::app::catalog::MaterialCatalogFetcher;
use crate::app::client::Upstream;
use crate::app::matching::MatchingEngine;
use crate::app::models::{BestMaterialMatch, MaterialQuery};
use crate::app::suppliers::SupplierDirectoryFetcher;
use crate::errors::QueryResult;

/// Answers "best material of this type from a supplier in this locality"
pub struct BestMaterialQueryService {
    catalog: MaterialCatalogFetcher,
    suppliers: SupplierDirectoryFetcher,
    engine: MatchingEngine,
}

impl BestMaterialQueryService {
    /// Wire the fetchers to one upstream and one shared cache
    pub fn new(upstream: Arc<dyn Upstream>, cache: Arc<dyn KeyValueCache>) -> Self {
        Self::from_parts(
            MaterialCatalogFetcher::new(Arc::clone(&upstream), cache),
            SupplierDirectoryFetcher::new(upstream),
        )
    }

    pub fn from_parts(catalog: MaterialCatalogFetcher, suppliers: SupplierDirectoryFetcher) -> Self {
        Self {
            catalog,
            suppliers,
            engine: MatchingEngine::new(),
        }
    }

    pub fn catalog(&self) -> &MaterialCatalogFetcher {
        &self.catalog
    }

    pub fn suppliers(&self) -> &SupplierDirectoryFetcher {
        &self.suppliers
    }

    /// Ranked matches for `query`
    ///
    /// `query.max_price` is not applied as a filter.
    ///
    /// # Errors
    ///
    /// Returns the first `QueryError` raised by the catalog fetch, the
    /// supplier fetch, ranking or the join
    pub async fn find_best_material(
        &self,
        query: &MaterialQuery,
    ) -> QueryResult<Vec<BestMaterialMatch>> {
        info!(
            "Finding best '{}' material in '{}'",
            query.material_type, query.locality
        );
        debug!("Price ceiling {} accepted but not applied", query.max_price);

        let materials = self.catalog.fetch().await?;
        let suppliers = self.suppliers.fetch(&query.locality).await?;

        let ranked = self.engine.rank(&materials, &query.material_type)?;
        let matches = self
            .engine
            .merge(&ranked, &suppliers, &query.material_type)?;

        info!(
            "Found {} matches for '{}' in '{}'",
            matches.len(),
            query.material_type,
            query.locality
        );
        Ok(matches)
    }

    /// Same as [`find_best_material`](Self::find_best_material) with loose arguments
    pub async fn find_best_material_with(
        &self,
        material_type: &str,
        max_price: f64,
        locality: &str,
    ) -> QueryResult<Vec<BestMaterialMatch>> {
        self.find_best_material(&MaterialQuery::new(material_type, max_price, locality))
            .await
    }
}
