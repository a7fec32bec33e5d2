//! Cache types for catalog responses.

use shopfront_core::ProductId;

use super::types::ProductDetail;

/// Cache key for catalog responses.
///
/// Listings and searches are never cached; only the responses that are stable
/// for the lifetime of a browsing session are.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<String>),
    Product(Box<ProductDetail>),
}
