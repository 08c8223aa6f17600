//! HTTP client for the DummyJSON product API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::ProductQuery,
    types::{Category, Product, ProductID, ProductsResponse},
    Error,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

const USER_AGENT: &str = concat!("catalog/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the product API.
///
/// Stateless apart from its configuration, so it can be shared and called
/// concurrently with different queries. Each request builds a fresh
/// `reqwest::Client` with the configured timeout. Nothing is retried here.
pub struct Client {
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Overrides the per-request timeout (30 seconds by default).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn base(&self) -> Result<Url, Error> {
        Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::Transport(format!("invalid base URL: {}", e))
        })
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::Transport(format!("invalid URL: {}", e))
        })
    }

    /// Builds the request URL for a listing query without sending anything.
    pub fn products_url(&self, query: &ProductQuery) -> Result<Url, Error> {
        query.to_url(&self.base()?).ok_or_else(|| {
            tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
            Error::Transport("base URL cannot carry a path".to_string())
        })
    }

    async fn get<T>(&self, url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Transport(e.to_string())
            })?;
        tracing::debug!("GET {}", url);
        let resp = client
            .get(url)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::Transport(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e.to_string())
        })?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown Status").to_string()
            } else {
                truncate_body(&body)
            };
            tracing::error!("Request failed with status {}: {}", status, message);
            return Err(Error::Fetch {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Decode(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Fetches one page of products. The endpoint is chosen from the query:
    /// search when `q` is non-blank, else category when one is set, else the
    /// unscoped listing.
    pub async fn get_products(&self, query: &ProductQuery) -> Result<ProductsResponse, Error> {
        let url = self.products_url(query)?;
        self.get::<ProductsResponse>(url).await
    }

    /// Fetches a single product by its numeric ID.
    pub async fn get_product(&self, product_id: ProductID) -> Result<Product, Error> {
        let url = self.get_url(format!("/products/{}", product_id).as_str())?;
        self.get::<Product>(url).await
    }

    /// Fetches the full category list.
    pub async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        let url = self.get_url("/products/categories")?;
        self.get::<Vec<Category>>(url).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert!(out.len() < body.len());
    }

    #[test]
    fn products_url_uses_configured_base() {
        let client = Client::with_base_url("http://localhost:9999/");
        let url = client
            .products_url(&ProductQuery::default().with_page(2))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9999/products?limit=12&skip=12");
    }
}
