//! AdForge CLI: browse a product catalog, generate ads, and post-process images.
//!
//! Usage:
//!   adforge catalog <CSV>            List publishable products
//!   adforge info <CSV> <HANDLE>      Show one product in detail
//!   adforge generate <CSV> <HANDLE>  Generate an ad for a product
//!   adforge edit <IMAGE>             Resize, brand, and export an image
//!   adforge check                    Check configuration and credentials

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use adforge_common::config::AppConfig;

mod commands;

use commands::edit::EditArgs;
use commands::generate::CreativeArgs;

#[derive(Parser)]
#[command(
    name = "adforge",
    about = "Marketing ad generation for storefront catalogs",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List publishable products in a catalog CSV
    Catalog {
        /// Path to the catalog CSV export
        csv: PathBuf,

        /// Only show products from this vendor
        #[arg(long)]
        vendor: Option<String>,

        /// Only show products in this category
        #[arg(long)]
        category: Option<String>,

        /// Print products as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one product in detail
    Info {
        /// Path to the catalog CSV export
        csv: PathBuf,

        /// Product handle
        handle: String,
    },

    /// Generate a marketing ad for a product
    Generate {
        /// Path to the catalog CSV export
        csv: PathBuf,

        /// Product handle
        handle: String,

        /// Output directory for the image and ad JSON
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        #[command(flatten)]
        creative: CreativeArgs,

        #[command(flatten)]
        edit: EditArgs,
    },

    /// Resize, overlay a logo, and export an image
    Edit {
        /// Source image: file path, http(s) URL, or data URL
        image: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        edit: EditArgs,
    },

    /// Check configuration and credentials
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_problem) = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    adforge_common::logging::init_logging(&logging);
    if let Some(e) = config_problem {
        tracing::warn!(error = %e, "Ignoring config file; using defaults");
    }

    match cli.command {
        Commands::Catalog {
            csv,
            vendor,
            category,
            json,
        } => commands::catalog::run(csv, vendor, category, json),
        Commands::Info { csv, handle } => commands::info::run(csv, handle),
        Commands::Generate {
            csv,
            handle,
            output,
            creative,
            edit,
        } => commands::generate::run(&config, csv, handle, output, creative, edit).await,
        Commands::Edit {
            image,
            output,
            edit,
        } => commands::edit::run(&config, image, output, edit).await,
        Commands::Check => commands::check::run(&config),
    }
}
