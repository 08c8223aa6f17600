mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{
    Endpoint, ProductQuery, Query, SortKey, SortOrder, ALL_CATEGORIES, DEFAULT_PAGE_SIZE,
};
