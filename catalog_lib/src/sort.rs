//! Client-side sort reconciliation.
//!
//! The API accepts `sortBy`/`order` on every listing endpoint but only
//! honors them on some. The client therefore re-sorts whatever page it
//! receives. This is page-local: items on other pages are not considered, so
//! the order across pages is whatever the server produced.

use std::cmp::Ordering;

use catalog_api::types::Product;
use catalog_api::{SortKey, SortOrder};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Returns a reordered copy of `products` when both `sort_by` and `order`
/// are set, or an unchanged copy otherwise (keeping server and search
/// relevance order). The sort is stable in both directions.
pub fn sort_products(
    products: &[Product],
    sort_by: Option<SortKey>,
    order: Option<SortOrder>,
) -> Vec<Product> {
    let mut sorted = products.to_vec();
    let (Some(key), Some(order)) = (sort_by, order) else {
        return sorted;
    };
    sorted.sort_by(|a, b| {
        let ord = compare(key, a, b);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    sorted
}

fn compare(key: SortKey, a: &Product, b: &Product) -> Ordering {
    match key {
        SortKey::Title => collation_key(&a.title)
            .cmp(&collation_key(&b.title))
            .then_with(|| a.title.cmp(&b.title)),
        // Listed price, not the discounted one.
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Rating => a.rating.total_cmp(&b.rating),
    }
}

/// Accent- and case-folded form of a title: "Éclair" compares as "eclair",
/// so it lands between "Banana" and "Zebra".
fn collation_key(title: &str) -> String {
    title
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
