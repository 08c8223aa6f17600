mod commands;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use catalog_lib::{CachedClient, CartCounter, CatalogConfig, SqliteStorage};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse, search and inspect products from the DummyJSON catalog")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides CATALOG_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// SQLite file holding the cart (overrides CATALOG_STORAGE_PATH)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a page of products
    Products(commands::products::ProductsArgs),
    /// Show a single product
    Product(commands::product::ProductArgs),
    /// List product categories
    Categories,
    /// Show or change the cart counter
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Browse interactively: search, filter, sort and page from stdin
    Browse(commands::browse::BrowseArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("catalog=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_name(&cli.output);

    let mut config = CatalogConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(storage) = &cli.storage {
        config.storage_path = storage.clone();
    }

    let client = Arc::new(CachedClient::from_config(&config));

    match &cli.command {
        Commands::Products(args) => {
            commands::products::run(args, &client, &config, format).await?
        }
        Commands::Product(args) => commands::product::run(args, &client, format).await?,
        Commands::Categories => commands::categories::run(&client, format).await?,
        Commands::Cart { action } => {
            let cart = open_cart(&config)?;
            commands::cart::run(action, &cart, format)?
        }
        Commands::Browse(args) => {
            let cart = open_cart(&config)?;
            commands::browse::run(args, client, &cart, &config, format).await?
        }
    }

    Ok(())
}

fn open_cart(config: &CatalogConfig) -> Result<CartCounter<SqliteStorage>> {
    let storage = SqliteStorage::open(&config.storage_path).with_context(|| {
        format!(
            "Failed to open cart storage at {}",
            config.storage_path.display()
        )
    })?;
    Ok(CartCounter::new(storage))
}
