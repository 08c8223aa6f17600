//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use catalog_api::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

use crate::client::DEFAULT_CACHE_TTL;
use crate::debounce::DEFAULT_DEBOUNCE;

/// Settings shared by the CLI commands. Every field has a default, and
/// unparsable environment values fall back to it.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogConfig {
    /// API root, `CATALOG_BASE_URL`.
    pub base_url: String,
    /// Products per page, `CATALOG_PAGE_SIZE`.
    pub page_size: u32,
    /// Lifetime of cached responses, `CATALOG_CACHE_TTL_SECS`.
    pub cache_ttl: Duration,
    /// Quiet period before typed search text is applied, `CATALOG_DEBOUNCE_MS`.
    pub debounce: Duration,
    /// Per-request timeout, `CATALOG_TIMEOUT_SECS`.
    pub timeout: Duration,
    /// SQLite file backing the cart counter, `CATALOG_STORAGE_PATH`.
    pub storage_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            cache_ttl: DEFAULT_CACHE_TTL,
            debounce: DEFAULT_DEBOUNCE,
            timeout: Duration::from_secs(30),
            storage_path: PathBuf::from("catalog.db"),
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str| lookup(key).and_then(|val| val.trim().parse::<u64>().ok());

        Self {
            base_url: lookup("CATALOG_BASE_URL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            page_size: number("CATALOG_PAGE_SIZE")
                .filter(|n| (1..=100).contains(n))
                .map(|n| n as u32)
                .unwrap_or(defaults.page_size),
            cache_ttl: number("CATALOG_CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            debounce: number("CATALOG_DEBOUNCE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            timeout: number("CATALOG_TIMEOUT_SECS")
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            storage_path: lookup("CATALOG_STORAGE_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
        }
    }
}
