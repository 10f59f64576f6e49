//! Material Finder CLI application
//!
//! Command-line interface for finding the best-ranked material of a type
//! stocked by suppliers in a locality.

use std::process;

use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

// Import CLI modules through the library (module is public but not re-exported)
use material_finder::cli::{
    handle_cache, handle_config, handle_materials, handle_query, handle_suppliers, Cli, Commands,
    CommandContext, ConfigAction, ConfigArgs,
};
use material_finder::config::AppConfig;
use material_finder::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        debug!("Command failed ({})", e.category());
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    // `config init` must work even when the existing file is broken
    let config = match &cli.command {
        Commands::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => AppConfig::default(),
        _ => AppConfig::load(cli.global.config.clone()).await?,
    };

    init_logging(&cli, &config);

    info!("Material Finder v{} starting", env!("CARGO_PKG_VERSION"));

    let ctx = CommandContext::new(config, cli.global.clone());

    match cli.command {
        Commands::Query(args) => {
            info!("Executing query command");
            handle_query(&ctx, args).await
        }
        Commands::Materials(args) => {
            info!("Executing materials command");
            handle_materials(&ctx, args).await
        }
        Commands::Suppliers(args) => {
            info!("Executing suppliers command");
            handle_suppliers(&ctx, args).await
        }
        Commands::Cache(args) => {
            info!("Executing cache command");
            handle_cache(&ctx, args).await
        }
        Commands::Config(args) => {
            info!("Executing config command");
            handle_config(&ctx, args).await
        }
    }
}

/// Initialize logging from CLI verbosity, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let configured = config.logging.level.parse::<tracing::Level>().ok();
    let log_level = cli.log_level(configured);

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("material_finder={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
