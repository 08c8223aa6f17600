//! Validation of user-supplied CLI input before it reaches the address or
//! the API.

use catalog_api::types::ProductID;
use catalog_api::{SortKey, SortOrder, ALL_CATEGORIES};

use crate::error::CatalogError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_CATEGORY_LENGTH: usize = 64;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, CatalogError> {
    if input.len() > max_len {
        return Err(CatalogError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(CatalogError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate search text: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, CatalogError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: i64) -> Result<u32, CatalogError> {
    if page < 1 {
        return Err(CatalogError::InvalidInput("page must be >= 1".to_string()));
    }
    u32::try_from(page)
        .map_err(|_| CatalogError::InvalidInput(format!("page {} is too large", page)))
}

/// Validate page size (must be 1..=100).
pub fn validate_limit(limit: i64) -> Result<u32, CatalogError> {
    if !(1..=MAX_PAGE_SIZE as i64).contains(&limit) {
        return Err(CatalogError::InvalidInput(format!(
            "limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(limit as u32)
}

/// Validate a sort key: case-insensitive.
pub fn validate_sort_key(input: &str) -> Result<SortKey, CatalogError> {
    input.trim().to_lowercase().parse().map_err(|_| {
        CatalogError::InvalidInput(format!(
            "unknown sort key '{}'. Valid values: price, title, rating",
            input
        ))
    })
}

/// Validate a sort order: case-insensitive, supports `ascending`/`descending`.
pub fn validate_sort_order(input: &str) -> Result<SortOrder, CatalogError> {
    match input.trim().to_lowercase().as_str() {
        "asc" | "ascending" => Ok(SortOrder::Asc),
        "desc" | "descending" => Ok(SortOrder::Desc),
        _ => Err(CatalogError::InvalidInput(format!(
            "unknown sort order '{}'. Valid values: asc, desc",
            input
        ))),
    }
}

/// Validate an optional sort pair. A key without an order (or the reverse)
/// is rejected, since half a pair does not reorder anything.
pub fn validate_sort(
    sort_by: Option<&str>,
    order: Option<&str>,
) -> Result<Option<(SortKey, SortOrder)>, CatalogError> {
    match (sort_by, order) {
        (None, None) => Ok(None),
        (Some(key), Some(order)) => Ok(Some((
            validate_sort_key(key)?,
            validate_sort_order(order)?,
        ))),
        _ => Err(CatalogError::InvalidInput(
            "sort key and order must be given together".to_string(),
        )),
    }
}

/// Validate a category slug: lowercase letters, digits and hyphens, or `all`.
/// Input is trimmed and lowercased.
pub fn validate_category(input: &str) -> Result<String, CatalogError> {
    let slug = input.trim().to_lowercase();
    if slug.is_empty() {
        return Ok(ALL_CATEGORIES.to_string());
    }
    if slug.len() > MAX_CATEGORY_LENGTH {
        return Err(CatalogError::InvalidInput(format!(
            "category exceeds maximum length of {} bytes",
            MAX_CATEGORY_LENGTH
        )));
    }
    if slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        Ok(slug)
    } else {
        Err(CatalogError::InvalidInput(format!(
            "invalid category '{}'. Expected a slug like 'smartphones' or 'home-decoration'",
            input
        )))
    }
}

/// Validate a product ID: a positive integer.
pub fn validate_product_id(input: &str) -> Result<ProductID, CatalogError> {
    match input.trim().parse::<ProductID>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CatalogError::InvalidInput(format!(
            "invalid product ID '{}'. Expected a positive integer",
            input
        ))),
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
