//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding cache and input validation failures.
#[derive(Debug)]
pub enum CatalogError {
    /// An error from the underlying API client.
    Api(catalog_api::Error),
    /// A cache operation failed (e.g. deserialization of cached data).
    Cache(String),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The API message is shown to users verbatim.
            Self::Api(e) => write!(f, "{}", e),
            Self::Cache(msg) => write!(f, "Cache error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<catalog_api::Error> for CatalogError {
    fn from(e: catalog_api::Error) -> Self {
        Self::Api(e)
    }
}
