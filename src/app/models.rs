//! Data models for Material Finder
//!
//! Upstream records use camelCase JSON field names. `BestMaterialMatch`
//! serializes with a `SupplierSummary`, which drops the supplier's stock map.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A material from the catalog
///
/// Missing fields decode to zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    pub id: i64,
    pub material_name: String,
    /// Type tag, e.g. "steel"
    pub material_type: String,
    /// Unit price
    pub price: f64,
    /// Unit of measure, e.g. "kg"
    pub unit: String,
    /// Higher is better
    pub rating: i64,
    /// Higher is better
    pub quality: i64,
}

impl Material {
    /// Create a material record
    pub fn new(
        id: i64,
        material_name: impl Into<String>,
        material_type: impl Into<String>,
        price: f64,
        unit: impl Into<String>,
        rating: i64,
        quality: i64,
    ) -> Self {
        Self {
            id,
            material_name: material_name.into(),
            material_type: material_type.into(),
            price,
            unit: unit.into(),
            rating,
            quality,
        }
    }
}

/// One stock line held by a supplier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockDetail {
    pub material_name: String,
    /// Free-form status, e.g. "In Stock"
    pub stock_availability: String,
    pub stock_quantity: u64,
}

impl StockDetail {
    pub fn new(
        material_name: impl Into<String>,
        stock_availability: impl Into<String>,
        stock_quantity: u64,
    ) -> Self {
        Self {
            material_name: material_name.into(),
            stock_availability: stock_availability.into(),
            stock_quantity,
        }
    }
}

/// A supplier with its stock, keyed by material type
///
/// Missing fields decode to zero values; a `null` stock map or stock list
/// decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    pub id: i64,
    pub supplier_name: String,
    /// Matched exactly against the queried locality
    pub supplier_location: String,
    #[serde(deserialize_with = "nullable_stock")]
    pub materials: HashMap<String, Vec<StockDetail>>,
}

fn nullable_stock<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<StockDetail>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, Option<Vec<StockDetail>>>> =
        Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(material_type, stock)| (material_type, stock.unwrap_or_default()))
        .collect())
}

impl Supplier {
    /// Create a supplier with no stock
    pub fn new(
        id: i64,
        supplier_name: impl Into<String>,
        supplier_location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            supplier_name: supplier_name.into(),
            supplier_location: supplier_location.into(),
            materials: HashMap::new(),
        }
    }

    /// Add stock lines under a material type
    pub fn with_stock(
        mut self,
        material_type: impl Into<String>,
        stock: impl IntoIterator<Item = StockDetail>,
    ) -> Self {
        self.materials
            .entry(material_type.into())
            .or_default()
            .extend(stock);
        self
    }

    /// Stock lines listed under `material_type`, in upstream order
    pub fn stock_for(&self, material_type: &str) -> &[StockDetail] {
        self.materials
            .get(material_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Projection returned to callers
    pub fn summary(&self) -> SupplierSummary {
        SupplierSummary {
            id: self.id,
            supplier_name: self.supplier_name.clone(),
            supplier_location: self.supplier_location.clone(),
        }
    }
}

/// Supplier fields exposed in query results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSummary {
    pub id: i64,
    pub supplier_name: String,
    pub supplier_location: String,
}

/// A ranked material paired with a local supplier stocking it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMaterialMatch {
    pub material: Material,
    pub supplier: SupplierSummary,
}

impl BestMaterialMatch {
    pub fn new(material: &Material, supplier: &Supplier) -> Self {
        Self {
            material: material.clone(),
            supplier: supplier.summary(),
        }
    }
}

/// Input of a best-material query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialQuery {
    pub material_type: String,
    /// Accepted and carried through; not applied as a filter
    pub max_price: f64,
    pub locality: String,
}

impl MaterialQuery {
    pub fn new(
        material_type: impl Into<String>,
        max_price: f64,
        locality: impl Into<String>,
    ) -> Self {
        Self {
            material_type: material_type.into(),
            max_price,
            locality: locality.into(),
        }
    }
}
