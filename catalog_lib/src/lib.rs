//! Library layer for the product catalog browser.
//!
//! Wraps the `catalog_api` crate with an in-memory TTL cache and adds the
//! browsing model: shareable address state, debounced search, client-side
//! sort, the pagination window, pricing helpers, and the persisted cart
//! counter.

pub mod address;
pub mod cache;
pub mod cart;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod pagination;
pub mod pricing;
pub mod session;
pub mod sort;
pub mod storage;
pub mod validation;

pub use catalog_api;
pub use catalog_api::types;
pub use catalog_api::{ProductQuery, Query, SortKey, SortOrder, ALL_CATEGORIES};

pub use address::{ActiveFilter, AddressState, AddressUpdate, QueryKey};
pub use cache::MemoryCache;
pub use cart::{CartCounter, CART_STORAGE_KEY};
pub use client::CachedClient;
pub use config::CatalogConfig;
pub use debounce::{Debouncer, SearchBox};
pub use error::CatalogError;
pub use pagination::{PageItem, PageWindow};
pub use pricing::{PriceTag, StockBadge};
pub use session::ResponseGate;
pub use sort::sort_products;
pub use storage::{LocalStorage, MemoryStorage, SqliteStorage, StorageError};
