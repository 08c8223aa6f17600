use serde::{Deserialize, Serialize};

use super::Product;

/// One page of products from any of the listing endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    /// Count of all matching items across all pages.
    pub total: u32,
    /// Offset of this page.
    pub skip: u32,
    /// Requested page size.
    pub limit: u32,
}
