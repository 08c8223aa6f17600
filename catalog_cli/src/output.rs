use std::io::Write;

use anyhow::Result;
use catalog_lib::address::ActiveFilter;
use catalog_lib::pagination::PageWindow;
use catalog_lib::pricing::{format_currency, PriceTag, StockBadge};
use catalog_lib::types::{Category, Product};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Was")]
    #[serde(rename = "Was")]
    was: String,
    #[tabled(rename = "Rating")]
    #[serde(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Stock")]
    #[serde(rename = "Stock")]
    stock: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "Slug")]
    #[serde(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Tabled, Serialize)]
struct DetailRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct ReviewRow {
    #[tabled(rename = "Rating")]
    #[serde(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Reviewer")]
    #[serde(rename = "Reviewer")]
    reviewer: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Comment")]
    #[serde(rename = "Comment")]
    comment: String,
}

// -- Row builders --

fn build_product_rows(products: &[Product]) -> Vec<ProductRow> {
    products
        .iter()
        .map(|p| {
            let tag = PriceTag::for_product(p);
            ProductRow {
                id: p.id,
                title: p.title.clone(),
                category: p.category.clone(),
                price: format_currency(tag.final_price),
                was: match tag.discount {
                    Some(discount) => format!("{} (-{}%)", format_currency(tag.listed), discount),
                    None => String::new(),
                },
                rating: format!("{:.1}", p.rating),
                stock: format!("{} ({})", StockBadge::for_stock(p.stock), p.stock),
            }
        })
        .collect()
}

fn build_category_rows(categories: &[Category]) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|c| CategoryRow {
            slug: c.slug.clone(),
            name: c.name.clone(),
        })
        .collect()
}

fn build_detail_rows(product: &Product) -> Vec<DetailRow> {
    let mut rows = Vec::new();
    let mut push = |field: &str, value: String| {
        if !value.is_empty() {
            rows.push(DetailRow {
                field: field.to_string(),
                value,
            });
        }
    };

    push("ID", product.id.to_string());
    push("Title", product.title.clone());
    push("Brand", product.brand.clone().unwrap_or_default());
    push("Category", product.category.clone());
    push("Price", PriceTag::for_product(product).to_string());
    push(
        "Stock",
        format!("{} ({})", StockBadge::for_stock(product.stock), product.stock),
    );
    push("Rating", format!("{:.2}", product.rating));
    push("SKU", product.sku.clone().unwrap_or_default());
    push(
        "Weight",
        product.weight.map(|w| w.to_string()).unwrap_or_default(),
    );
    push(
        "Dimensions",
        product
            .dimensions
            .as_ref()
            .map(|d| {
                [d.width, d.height, d.depth]
                    .iter()
                    .map(|side| side.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string()))
                    .collect::<Vec<_>>()
                    .join(" x ")
            })
            .unwrap_or_default(),
    );
    push(
        "Warranty",
        product.warranty_information.clone().unwrap_or_default(),
    );
    push(
        "Shipping",
        product.shipping_information.clone().unwrap_or_default(),
    );
    push(
        "Availability",
        product.availability_status.clone().unwrap_or_default(),
    );
    push("Returns", product.return_policy.clone().unwrap_or_default());
    push(
        "Min. Order",
        product
            .minimum_order_quantity
            .map(|q| q.to_string())
            .unwrap_or_default(),
    );
    push("Tags", product.tags.join(", "));
    push("Description", product.description.clone());
    rows
}

fn build_review_rows(product: &Product) -> Vec<ReviewRow> {
    product
        .reviews
        .iter()
        .map(|r| ReviewRow {
            rating: format!("{}/5", r.rating),
            reviewer: r.reviewer_name.clone(),
            date: r.date.format("%Y-%m-%d").to_string(),
            comment: r.comment.clone(),
        })
        .collect()
}

// -- Rendering --

fn render_table<T: Tabled>(rows: Vec<T>, format: OutputFormat) -> String {
    let mut table = Table::new(rows);
    if format == OutputFormat::Markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

fn write_csv<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_products(products: &[Product], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&products),
        OutputFormat::Csv => write_csv(&build_product_rows(products), std::io::stdout())?,
        OutputFormat::Table | OutputFormat::Markdown => {
            println!("{}", render_table(build_product_rows(products), format))
        }
    }
    Ok(())
}

pub fn print_categories(categories: &[Category], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&categories),
        OutputFormat::Csv => write_csv(&build_category_rows(categories), std::io::stdout())?,
        OutputFormat::Table | OutputFormat::Markdown => {
            println!("{}", render_table(build_category_rows(categories), format))
        }
    }
    Ok(())
}

pub fn print_product_detail(product: &Product, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(product),
        OutputFormat::Csv => write_csv(&build_detail_rows(product), std::io::stdout())?,
        OutputFormat::Table | OutputFormat::Markdown => {
            println!("{}", render_table(build_detail_rows(product), format));

            let gallery = product.gallery();
            if !gallery.is_empty() {
                println!("\nImages:");
                for src in gallery {
                    println!("  {}", src);
                }
            }

            if product.reviews.is_empty() {
                println!("\nNo reviews yet.");
            } else {
                if let Some(avg) = product.review_average() {
                    println!("\nReviews ({}, average {:.1}/5):", product.reviews.len(), avg);
                }
                println!("{}", render_table(build_review_rows(product), format));
            }
        }
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Page controls as one line, e.g. `< Prev  1 ... 4 [5] 6 ... 17  Next >`.
/// Disabled arrows are omitted.
pub fn render_page_bar(window: &PageWindow) -> String {
    let items = window
        .items()
        .iter()
        .map(|item| match item.target() {
            Some(n) if n == window.page() => format!("[{}]", n),
            _ => item.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut parts = Vec::with_capacity(3);
    if window.can_go_previous() {
        parts.push("< Prev".to_string());
    }
    if !items.is_empty() {
        parts.push(items);
    }
    if window.can_go_next() {
        parts.push("Next >".to_string());
    }
    parts.join("  ")
}

/// One-line summary of the listing, e.g. `194 results (page 2 of 17)`.
pub fn render_summary(total: u32, window: &PageWindow) -> String {
    format!(
        "{} results (page {} of {})",
        total,
        window.page(),
        window.pages()
    )
}

/// Active filters as removable chips, or `None` for the default view.
pub fn render_filters(filters: &[ActiveFilter]) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    Some(
        filters
            .iter()
            .map(|f| format!("[{}]", f))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

pub fn print_empty_results() {
    println!("No results found");
    println!("Try a different search term, clear filters, or choose \"All Categories\".");
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
