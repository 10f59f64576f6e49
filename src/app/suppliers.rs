//! Supplier directory fetching filtered by locality
//!
//! Supplier data is never cached. The locality filter is an exact,
//! case-sensitive comparison against `supplierLocation`.

use std::sync::Arc;

use tracing::debug;

use crate::app::client::Upstream;
use crate::app::models::Supplier;
use crate::errors::{QueryError, QueryResult};

/// Fetches suppliers located in a given locality
pub struct SupplierDirectoryFetcher {
    upstream: Arc<dyn Upstream>,
}

impl SupplierDirectoryFetcher {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    /// Suppliers whose location equals `locality`, in upstream order
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Fetch` if the directory cannot be fetched or
    /// decoded, and `QueryError::NoSuppliersInLocality` if nobody matches
    pub async fn fetch(&self, locality: &str) -> QueryResult<Vec<Supplier>> {
        let suppliers = self.upstream.fetch_suppliers().await?;
        let total = suppliers.len();

        let local = filter_by_locality(suppliers, locality);
        debug!(
            "{} of {} suppliers are located in '{}'",
            local.len(),
            total,
            locality
        );

        if local.is_empty() {
            return Err(QueryError::NoSuppliersInLocality {
                locality: locality.to_string(),
            });
        }
        Ok(local)
    }
}

/// Keep suppliers whose location is exactly `locality`
pub fn filter_by_locality(suppliers: Vec<Supplier>, locality: &str) -> Vec<Supplier> {
    suppliers
        .into_iter()
        .filter(|supplier| supplier.supplier_location == locality)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{supplier, FakeUpstream};
    use crate::errors::FetchError;

    fn directory() -> Vec<Supplier> {
        vec![
            supplier(1, "Munich", "steel", &["Rebar"]),
            supplier(2, "Berlin", "steel", &["Rebar"]),
            supplier(3, "Munich", "copper", &["CopperWire"]),
            supplier(4, "munich", "steel", &["Rebar"]),
        ]
    }

    #[tokio::test]
    async fn test_filters_exact_locality_in_order() {
        let upstream = Arc::new(FakeUpstream::new(vec![], directory()));
        let fetcher = SupplierDirectoryFetcher::new(upstream.clone());

        let suppliers = fetcher.fetch("Munich").await.unwrap();

        let ids: Vec<i64> = suppliers.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(upstream.supplier_calls(), 1);
    }

    #[tokio::test]
    async fn test_no_suppliers_in_locality() {
        let upstream = Arc::new(FakeUpstream::new(vec![], directory()));
        let fetcher = SupplierDirectoryFetcher::new(upstream);

        match fetcher.fetch("Hamburg").await {
            Err(QueryError::NoSuppliersInLocality { locality }) => assert_eq!(locality, "Hamburg"),
            other => panic!("Expected NoSuppliersInLocality, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_locality_is_case_sensitive() {
        let upstream = Arc::new(FakeUpstream::new(vec![], directory()));
        let fetcher = SupplierDirectoryFetcher::new(upstream);

        let suppliers = fetcher.fetch("munich").await.unwrap();
        assert_eq!(suppliers.len(), 1);
        assert_eq!(suppliers[0].id, 4);

        assert!(fetcher.fetch("MUNICH").await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_distinct() {
        let upstream = Arc::new(FakeUpstream {
            fail_suppliers: true,
            ..Default::default()
        });
        let fetcher = SupplierDirectoryFetcher::new(upstream);

        let result = fetcher.fetch("Munich").await;
        assert!(matches!(
            result,
            Err(QueryError::Fetch(FetchError::ServerError { .. }))
        ));
    }
}
