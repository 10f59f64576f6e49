//! Command-line interface components
//!
//! This module contains CLI-specific code for the Material Finder
//! application: argument parsing and the command handlers.

pub mod args;
pub mod commands;

pub use args::{
    CacheAction, CacheArgs, Cli, Commands, ConfigAction, ConfigArgs, GlobalArgs, MaterialsArgs,
    OutputFormat, QueryArgs, SuppliersArgs,
};
pub use commands::{
    handle_cache, handle_config, handle_materials, handle_query, handle_suppliers, CommandContext,
};
