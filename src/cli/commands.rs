//! Command handlers for Material Finder CLI
//!
//! This module implements the command handlers that coordinate between
//! CLI arguments, the loaded configuration and the core application.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::app::{
    build_cache, BestMaterialMatch, BestMaterialQueryService, CacheBackend, CacheConfig,
    DiskCache, KeyValueCache, MatchingEngine, Material, MaterialCatalogFetcher, Supplier,
    SupplierDirectoryFetcher, UpstreamClient,
};
use crate::cli::{
    CacheAction, CacheArgs, ConfigAction, ConfigArgs, GlobalArgs, MaterialsArgs, OutputFormat,
    QueryArgs, SuppliersArgs,
};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Effective settings for one invocation: loaded configuration plus global flags
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: AppConfig,
    pub global: GlobalArgs,
}

impl CommandContext {
    pub fn new(config: AppConfig, global: GlobalArgs) -> Self {
        Self { config, global }
    }

    /// Cache settings after applying `--cache-dir` and `--no-cache`
    pub fn cache_config(&self) -> CacheConfig {
        let mut cache_config = self.config.cache_config();
        if let Some(dir) = &self.global.cache_dir {
            cache_config.cache_root = Some(dir.clone());
        }
        if self.global.no_cache {
            cache_config = cache_config.with_backend(CacheBackend::None);
        }
        cache_config
    }

    /// Wire the HTTP upstream, the configured cache and both fetchers
    pub async fn build_service(&self) -> Result<BestMaterialQueryService> {
        let upstream = Arc::new(UpstreamClient::with_config(
            self.config.client_config(),
            self.config.endpoints()?,
        )?);
        let cache = build_cache(&self.cache_config()).await?;

        let catalog = MaterialCatalogFetcher::new(upstream.clone(), cache)
            .with_rounds(self.config.upstream.catalog_rounds);
        let suppliers = SupplierDirectoryFetcher::new(upstream);

        Ok(BestMaterialQueryService::from_parts(catalog, suppliers))
    }

    /// Effective on-disk cache directory, regardless of backend
    pub fn disk_cache_root(&self) -> Result<PathBuf> {
        match self.cache_config().cache_root {
            Some(root) => Ok(root),
            None => Ok(DiskCache::default_cache_dir()?),
        }
    }

    /// The on-disk store, or `None` if its directory was never created
    async fn existing_disk_cache(&self) -> Result<Option<DiskCache>> {
        let root = self.disk_cache_root()?;
        if !root.is_dir() {
            debug!("No disk cache at {}", root.display());
            return Ok(None);
        }
        Ok(Some(DiskCache::new(Some(root), self.cache_config().ttl).await?))
    }
}

/// Handle the query command
pub async fn handle_query(ctx: &CommandContext, args: QueryArgs) -> Result<()> {
    args.validate().map_err(AppError::generic)?;

    let service = ctx.build_service().await?;
    let matches = service
        .find_best_material_with(&args.material_type, args.max_price, &args.locality)
        .await?;

    match args.format {
        OutputFormat::Json => print_json(&matches)?,
        OutputFormat::Table => {
            if !ctx.global.quiet {
                println!(
                    "🔎 Best '{}' materials in {} ({} matches)",
                    args.material_type,
                    args.locality,
                    matches.len()
                );
                println!();
            }
            print_match_table(&matches);
        }
    }
    Ok(())
}

/// Handle the materials command
pub async fn handle_materials(ctx: &CommandContext, args: MaterialsArgs) -> Result<()> {
    let service = ctx.build_service().await?;
    let mut materials = service.catalog().fetch().await?;

    if let Some(material_type) = &args.material_type {
        materials = MatchingEngine::new().rank(&materials, material_type)?;
    }

    match args.format {
        OutputFormat::Json => print_json(&materials)?,
        OutputFormat::Table => {
            if !ctx.global.quiet {
                println!("📦 Materials Catalog ({} entries)", materials.len());
                println!();
            }
            print_material_table(&materials);
        }
    }
    Ok(())
}

/// Handle the suppliers command
pub async fn handle_suppliers(ctx: &CommandContext, args: SuppliersArgs) -> Result<()> {
    let service = ctx.build_service().await?;
    let suppliers = service.suppliers().fetch(&args.locality).await?;

    match args.format {
        OutputFormat::Json => print_json(&suppliers)?,
        OutputFormat::Table => {
            if !ctx.global.quiet {
                println!("🏭 Suppliers in {} ({})", args.locality, suppliers.len());
                println!();
            }
            print_supplier_list(&suppliers);
        }
    }
    Ok(())
}

/// Handle cache management commands
pub async fn handle_cache(ctx: &CommandContext, args: CacheArgs) -> Result<()> {
    match args.action {
        CacheAction::Info => handle_cache_info(ctx).await,
        CacheAction::Clear => handle_cache_clear(ctx).await,
    }
}

async fn handle_cache_info(ctx: &CommandContext) -> Result<()> {
    let cache_config = ctx.cache_config();

    println!("💾 Cache Information");
    println!("===================");
    println!("Backend: {}", cache_config.backend);

    let Some(cache) = ctx.existing_disk_cache().await? else {
        println!("TTL: {} minutes", cache_config.ttl.as_secs() / 60);
        println!("Location: {} (not created)", ctx.disk_cache_root()?.display());
        println!("Entries: 0");
        return Ok(());
    };
    let entries = cache.entries().await?;

    println!("TTL: {} minutes", cache.ttl().as_secs() / 60);
    println!("Location: {}", cache.cache_root().display());
    println!("Entries: {}", entries.len());

    for entry in &entries {
        println!(
            "  • {} ({:.1} KB, written {}{})",
            entry.key,
            entry.size_bytes as f64 / 1024.0,
            entry.written_at.format("%Y-%m-%d %H:%M:%S"),
            if entry.expired { ", expired" } else { "" }
        );
    }

    Ok(())
}

async fn handle_cache_clear(ctx: &CommandContext) -> Result<()> {
    let Some(cache) = ctx.existing_disk_cache().await? else {
        println!("ℹ️  No disk cache at {}", ctx.disk_cache_root()?.display());
        return Ok(());
    };
    let removed = cache.clear().await?;

    info!("Cleared {} entries from {}", removed, cache.cache_root().display());
    println!(
        "🧹 Removed {} cached entries from {}",
        removed,
        cache.cache_root().display()
    );
    Ok(())
}

/// Handle configuration management commands
pub async fn handle_config(ctx: &CommandContext, args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Init { path, force } => {
            let written = AppConfig::initialize(path, force).await?;
            println!("✅ Wrote default configuration to {}", written.display());
            Ok(())
        }
        ConfigAction::Show => {
            debug!("Rendering effective configuration");
            print!("{}", ctx.config.to_toml_string()?);
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_match_table(matches: &[BestMaterialMatch]) {
    println!(
        "{:<4} {:<24} {:>10} {:<6} {:>7} {:>6}  {}",
        "#", "Material", "Price", "Unit", "Quality", "Rating", "Supplier"
    );
    for (index, found) in matches.iter().enumerate() {
        let material = &found.material;
        println!(
            "{:<4} {:<24} {:>10.2} {:<6} {:>7} {:>6}  {} (#{})",
            index + 1,
            material.material_name,
            material.price,
            material.unit,
            material.quality,
            material.rating,
            found.supplier.supplier_name,
            found.supplier.id
        );
    }
}

fn print_material_table(materials: &[Material]) {
    println!(
        "{:<6} {:<24} {:<12} {:>10} {:<6} {:>7} {:>6}",
        "ID", "Material", "Type", "Price", "Unit", "Quality", "Rating"
    );
    for material in materials {
        println!(
            "{:<6} {:<24} {:<12} {:>10.2} {:<6} {:>7} {:>6}",
            material.id,
            material.material_name,
            material.material_type,
            material.price,
            material.unit,
            material.quality,
            material.rating
        );
    }
}

fn print_supplier_list(suppliers: &[Supplier]) {
    for supplier in suppliers {
        println!("{} (#{})", supplier.supplier_name, supplier.id);

        let mut types: Vec<&String> = supplier.materials.keys().collect();
        types.sort();
        for material_type in types {
            for stock in supplier.stock_for(material_type) {
                println!(
                    "  • [{}] {} - {} ({})",
                    material_type,
                    stock.material_name,
                    stock.stock_availability,
                    stock.stock_quantity
                );
            }
        }
    }
}
