use anyhow::{Context, Result};
use catalog_lib::CachedClient;

use crate::output::{print_categories, OutputFormat};

pub async fn run(client: &CachedClient, format: OutputFormat) -> Result<()> {
    let categories = client
        .get_categories()
        .await
        .context("Failed to load categories")?;
    eprintln!("{} categories", categories.len());
    print_categories(&categories, format)
}
