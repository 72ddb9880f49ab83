//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Pricing and cart mutations never fail; these cover catalog loading,
/// configuration and persistence.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// A catalog data file could not be read or parsed.
    #[error("Failed to load catalog file {path}: {message}")]
    CatalogLoad { path: String, message: String },

    /// Pricing configuration violates its invariants.
    #[error("Invalid pricing config: {0}")]
    InvalidPricingConfig(String),

    /// Unknown sort option.
    #[error("Unknown sort option: {0}")]
    InvalidSortOption(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),
}

impl From<fabric_cache::CacheError> for CommerceError {
    fn from(e: fabric_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_surfaces_as_cache_error() {
        let decode = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = CommerceError::from(fabric_cache::CacheError::from(decode));

        assert!(matches!(err, CommerceError::CacheError(_)));
        assert!(err.to_string().starts_with("Cache error: Serialization error:"));
    }
}
