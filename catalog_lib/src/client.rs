//! Caching wrapper around the API client.

use std::time::Duration;

use catalog_api::types::{Category, Product, ProductID, ProductsResponse};
use catalog_api::{Client, ProductQuery};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::MemoryCache;
use crate::config::CatalogConfig;
use crate::error::CatalogError;

/// Default lifetime of cached responses.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// API client wrapper that adds an in-memory response cache.
///
/// Cache hits bypass the network entirely. Listing responses are keyed by
/// the full request URL, so two queries that map to the same request share
/// an entry. Failed requests are never cached and never retried.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
}

impl CachedClient {
    /// Creates a new cached client using the production API URL.
    pub fn new(cache: MemoryCache) -> Self {
        Self {
            inner: Client::new(),
            cache,
        }
    }

    /// Creates a new cached client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, cache: MemoryCache) -> Self {
        Self {
            inner: Client::with_base_url(base_url),
            cache,
        }
    }

    /// Builds the client described by `config`: base URL, timeout and cache TTL.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            inner: Client::with_base_url(&config.base_url).with_timeout(config.timeout),
            cache: MemoryCache::new(config.cache_ttl),
        }
    }

    /// The wrapped uncached client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Fetches one page of products, returning cached results when available.
    pub async fn get_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ProductsResponse, CatalogError> {
        let url = self.inner.products_url(query)?;
        let cache_key = format!("products:{}", url);
        if let Some(resp) = self.cached(&cache_key)? {
            return Ok(resp);
        }

        let resp = self.inner.get_products(query).await?;
        tracing::debug!(
            "Loaded {} of {} products (skip {})",
            resp.products.len(),
            resp.total,
            resp.skip
        );
        self.store(cache_key, &resp);
        Ok(resp)
    }

    /// Fetches a single product by ID, returning cached results when available.
    pub async fn get_product(&self, product_id: ProductID) -> Result<Product, CatalogError> {
        let cache_key = format!("product:{}", product_id);
        if let Some(product) = self.cached(&cache_key)? {
            return Ok(product);
        }

        let product = self.inner.get_product(product_id).await?;
        self.store(cache_key, &product);
        Ok(product)
    }

    /// Fetches the category list, returning cached results when available.
    pub async fn get_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let cache_key = "categories".to_string();
        if let Some(categories) = self.cached(&cache_key)? {
            return Ok(categories);
        }

        let categories = self.inner.get_categories().await?;
        self.store(cache_key, &categories);
        Ok(categories)
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached responses that are still fresh.
    pub fn cached_entries(&self) -> usize {
        self.cache.purge_expired()
    }

    fn cached<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CatalogError> {
        match self.cache.get(key) {
            Some(raw) => {
                tracing::debug!("cache hit: {}", key);
                let value = serde_json::from_str(&raw).map_err(|e| {
                    self.cache.remove(key);
                    CatalogError::Cache(format!("{}: {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn store<T: Serialize>(&self, key: String, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            self.cache.set(key, json);
        }
    }
}
