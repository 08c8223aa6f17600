use anyhow::{Context, Result};
use clap::Args;
use catalog_lib::types::ProductID;
use catalog_lib::CachedClient;

use crate::output::{print_product_detail, OutputFormat};

#[derive(Args)]
pub struct ProductArgs {
    /// Product ID
    #[arg(long)]
    pub id: ProductID,
}

pub async fn run(args: &ProductArgs, client: &CachedClient, format: OutputFormat) -> Result<()> {
    let product = client
        .get_product(args.id)
        .await
        .context("Failed to load product")?;
    print_product_detail(&product, format)
}
