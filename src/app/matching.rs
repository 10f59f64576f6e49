//! Material ranking and the material/supplier join
//!
//! Ranking keeps only materials of the requested type and stable-sorts them
//! by quality, then rating, both descending. Materials that tie on both keep
//! their catalog order.
//!
//! The join walks ranked materials, then suppliers, then each supplier's
//! stock lines for the requested type, emitting one match per stock line
//! whose name equals the material's name. Output order follows that nesting.

use std::cmp::Ordering;

use tracing::debug;

use crate::app::models::{BestMaterialMatch, Material, Supplier};
use crate::errors::{QueryError, QueryResult};

/// Filters, ranks and joins materials against supplier stock
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchingEngine;

impl MatchingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Materials of `material_type`, best first
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NoMatchingMaterial` if no material has that type
    pub fn rank(&self, materials: &[Material], material_type: &str) -> QueryResult<Vec<Material>> {
        let mut ranked: Vec<Material> = materials
            .iter()
            .filter(|material| material.material_type == material_type)
            .cloned()
            .collect();

        if ranked.is_empty() {
            return Err(QueryError::NoMatchingMaterial {
                material_type: material_type.to_string(),
            });
        }

        // Vec::sort_by is stable
        ranked.sort_by(compare_rank);

        debug!(
            "Ranked {} of {} materials of type '{}'",
            ranked.len(),
            materials.len(),
            material_type
        );
        Ok(ranked)
    }

    /// Pair each ranked material with every supplier stocking it under `material_type`
    ///
    /// # Errors
    ///
    /// Returns `QueryError::NoMergedMatch` if nothing pairs up
    pub fn merge(
        &self,
        ranked: &[Material],
        suppliers: &[Supplier],
        material_type: &str,
    ) -> QueryResult<Vec<BestMaterialMatch>> {
        let mut matches = Vec::new();

        for material in ranked {
            for supplier in suppliers {
                for stock in supplier.stock_for(material_type) {
                    if stock.material_name == material.material_name {
                        matches.push(BestMaterialMatch::new(material, supplier));
                    }
                }
            }
        }

        if matches.is_empty() {
            return Err(QueryError::NoMergedMatch {
                material_type: material_type.to_string(),
            });
        }

        debug!(
            "Joined {} ranked materials with {} suppliers into {} matches",
            ranked.len(),
            suppliers.len(),
            matches.len()
        );
        Ok(matches)
    }
}

/// Quality descending, then rating descending
pub fn compare_rank(a: &Material, b: &Material) -> Ordering {
    b.quality
        .cmp(&a.quality)
        .then_with(|| b.rating.cmp(&a.rating))
}
