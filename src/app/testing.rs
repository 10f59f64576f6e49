//! In-process fakes shared by unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::app::cache::KeyValueCache;
use crate::app::client::Upstream;
use crate::app::models::{Material, StockDetail, Supplier};
use crate::errors::{CacheError, CacheResult, FetchError, FetchResult};

/// Upstream serving canned responses and counting calls
#[derive(Debug, Default)]
pub(crate) struct FakeUpstream {
    /// Response for call `n` is `material_pages[n % len]`
    pub material_pages: Vec<Vec<Material>>,
    pub suppliers: Vec<Supplier>,
    /// 1-based materials call that fails
    pub fail_materials_on: Option<usize>,
    pub fail_suppliers: bool,
    pub material_calls: AtomicUsize,
    pub supplier_calls: AtomicUsize,
}

impl FakeUpstream {
    pub fn new(materials: Vec<Material>, suppliers: Vec<Supplier>) -> Self {
        Self {
            material_pages: vec![materials],
            suppliers,
            ..Default::default()
        }
    }

    pub fn material_calls(&self) -> usize {
        self.material_calls.load(Ordering::SeqCst)
    }

    pub fn supplier_calls(&self) -> usize {
        self.supplier_calls.load(Ordering::SeqCst)
    }
}

fn server_error(path: &str) -> FetchError {
    FetchError::ServerError {
        status: 500,
        url: format!("http://upstream.test/{}", path),
    }
}

#[async_trait]
impl Upstream for FakeUpstream {
    async fn fetch_materials(&self) -> FetchResult<Vec<Material>> {
        let call = self.material_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_materials_on == Some(call + 1) {
            return Err(server_error("materials"));
        }
        if self.material_pages.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.material_pages[call % self.material_pages.len()].clone())
    }

    async fn fetch_suppliers(&self) -> FetchResult<Vec<Supplier>> {
        self.supplier_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_suppliers {
            return Err(server_error("suppliers"));
        }
        Ok(self.suppliers.clone())
    }
}

/// Cache whose reads and writes always fail
#[derive(Debug, Default)]
pub(crate) struct BrokenCache;

#[async_trait]
impl KeyValueCache for BrokenCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Err(CacheError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "read failed",
        )))
    }

    async fn set(&self, _key: &str, _value: &[u8]) -> CacheResult<()> {
        Err(CacheError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "write failed",
        )))
    }

    async fn remove(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn clear(&self) -> CacheResult<usize> {
        Ok(0)
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(60)
    }
}

pub(crate) fn steel(id: i64, name: &str, rating: i64, quality: i64) -> Material {
    Material::new(id, name, "steel", 10.0, "kg", rating, quality)
}

pub(crate) fn supplier(id: i64, location: &str, material_type: &str, names: &[&str]) -> Supplier {
    Supplier::new(id, format!("Supplier {}", id), location).with_stock(
        material_type,
        names
            .iter()
            .map(|name| StockDetail::new(*name, "In Stock", 10)),
    )
}
