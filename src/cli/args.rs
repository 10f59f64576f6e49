//! Command-line argument parsing for Material Finder
//!
//! This module defines the CLI structure using clap derive macros: the
//! best-material query, catalog and supplier listings, and cache and
//! configuration management.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Material Finder - Find the best material from a local supplier
#[derive(Parser, Debug)]
#[command(
    name = "material_finder",
    version,
    about = "Find the best-ranked material of a type stocked by suppliers in a locality",
    long_about = "Queries the materials catalog and the supplier directory, ranks materials of the
requested type by quality and rating, and pairs them with local suppliers that stock them.
The catalog is cached between runs."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cache directory path
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Bypass the catalog cache for this run
    #[arg(long, global = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the best material of a type from suppliers in a locality
    Query(QueryArgs),

    /// List the materials catalog
    Materials(MaterialsArgs),

    /// List suppliers in a locality
    Suppliers(SuppliersArgs),

    /// Catalog cache management
    Cache(CacheArgs),

    /// Configuration file management
    Config(ConfigArgs),
}

/// Output rendering
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Arguments for the query command
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Material type to look for (exact, case-sensitive)
    #[arg(short = 't', long)]
    pub material_type: String,

    /// Price ceiling (accepted, not applied as a filter)
    #[arg(short = 'p', long)]
    pub max_price: f64,

    /// Supplier locality (exact, case-sensitive)
    #[arg(short, long)]
    pub locality: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the materials command
#[derive(Args, Debug, Clone)]
pub struct MaterialsArgs {
    /// Only show this type, ranked best first
    #[arg(short = 't', long)]
    pub material_type: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the suppliers command
#[derive(Args, Debug, Clone)]
pub struct SuppliersArgs {
    /// Supplier locality (exact, case-sensitive)
    #[arg(short, long)]
    pub locality: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for cache management
#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache management actions
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cache location and stored entries
    Info,

    /// Remove every cached entry
    Clear,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a commented default configuration file
    Init {
        /// Destination (user config directory if omitted)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    ///
    /// `configured` is the level from the config file, used when no
    /// verbosity flag is given.
    pub fn log_level(&self, configured: Option<tracing::Level>) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            configured.unwrap_or(tracing::Level::WARN)
        }
    }
}

impl QueryArgs {
    /// Reject arguments that can never produce an answer
    pub fn validate(&self) -> Result<(), String> {
        if self.material_type.trim().is_empty() {
            return Err("Material type must not be empty".to_string());
        }
        if self.locality.trim().is_empty() {
            return Err("Locality must not be empty".to_string());
        }
        if !self.max_price.is_finite() {
            return Err(format!("Invalid max price: {}", self.max_price));
        }
        Ok(())
    }
}
