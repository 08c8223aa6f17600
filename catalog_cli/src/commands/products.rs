use anyhow::{Context, Result};
use clap::Args;
use catalog_lib::pagination::PageWindow;
use catalog_lib::sort::sort_products;
use catalog_lib::validation;
use catalog_lib::{AddressState, AddressUpdate, CachedClient, CatalogConfig};

use crate::output::{
    print_empty_results, print_products, render_filters, render_page_bar, render_summary,
    OutputFormat,
};

#[derive(Args)]
pub struct ProductsArgs {
    /// Start from a shared address, e.g. "page=2&category=beauty&q=lip"
    #[arg(long)]
    pub address: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,

    /// Filter by category slug (e.g. smartphones, laptops), or "all"
    #[arg(long)]
    pub category: Option<String>,

    /// Free-text search; takes precedence over the category
    #[arg(long)]
    pub search: Option<String>,

    /// Sort field: price, title, rating
    #[arg(long, requires = "order")]
    pub sort_by: Option<String>,

    /// Sort order: asc, desc
    #[arg(long, requires = "sort_by")]
    pub order: Option<String>,

    /// Results per page (defaults to CATALOG_PAGE_SIZE or 12)
    #[arg(long)]
    pub limit: Option<i64>,
}

/// Resolves the address for a listing: the shared address first, then each
/// flag on top of it. Filter flags reset the page unless `--page` is given.
pub fn address_from_args(args: &ProductsArgs) -> Result<AddressState> {
    let mut address = AddressState::parse(args.address.as_deref().unwrap_or(""));

    if let Some(category) = &args.category {
        let validated = validation::validate_category(category)?;
        address.apply(AddressUpdate::category(&validated));
    }

    if let Some(search) = &args.search {
        let validated = if search.trim().is_empty() {
            String::new()
        } else {
            validation::validate_search(search)?
        };
        address.apply(AddressUpdate::search(&validated));
    }

    let sort = validation::validate_sort(args.sort_by.as_deref(), args.order.as_deref())?;
    if sort.is_some() {
        address.apply(AddressUpdate::sort(sort));
    }

    if let Some(page) = args.page {
        address.apply(AddressUpdate::page(validation::validate_page(page)?));
    }

    Ok(address)
}

pub async fn run(
    args: &ProductsArgs,
    client: &CachedClient,
    config: &CatalogConfig,
    format: OutputFormat,
) -> Result<()> {
    let address = address_from_args(args)?;
    let limit = match args.limit {
        Some(limit) => validation::validate_limit(limit)?,
        None => config.page_size,
    };

    let query = address.to_product_query(limit);
    let resp = client
        .get_products(&query)
        .await
        .context("Failed to load products")?;

    let window = PageWindow::new(address.page, resp.total, limit);
    if let Some(filters) = render_filters(&address.active_filters()) {
        eprintln!("{}", filters);
    }
    eprintln!("{}", render_summary(resp.total, &window));

    let products = sort_products(&resp.products, address.sort_by, address.order);
    if products.is_empty() {
        print_empty_results();
        return Ok(());
    }

    print_products(&products, format)?;
    eprintln!("{}", render_page_bar(&window));
    eprintln!("Address: ?{}", address.to_query_string());

    Ok(())
}
