//! Remote catalog API client.
//!
//! # Endpoints
//!
//! All requests are plain `GET`s against a fixed base URL:
//!
//! - `{base}/?skip=&limit=&q=` - paginated listing
//! - `{base}/search/?skip=&limit=&q=` - full-text search
//! - `{base}/category/{name}` - category listing
//! - `{base}/category-list` - category names
//! - `{base}/{id}` - product detail
//!
//! Only HTTP 200 counts as success. Every other outcome is normalized into a
//! [`RemoteError`]. There is no retry, timeout policy or cancellation, so two
//! overlapping listing requests settle in whatever order the network delivers
//! them.
//!
//! Category names and product details are cached using `moka`; listings and
//! searches always go to the network. The cache lives as long as the client,
//! so a one-shot `shopfront` command never hits it; long-lived embedders
//! sharing one [`CatalogClient`] do.

mod cache;
pub mod types;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shopfront_core::ProductId;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::StorefrontConfig;

use cache::{CacheKey, CacheValue};
pub use types::{
    Dimensions, ListingRoute, ProductDetail, ProductMeta, ProductPage, ProductQuery,
    ProductSummary, Review,
};

/// Status reported when a failure carries no HTTP status of its own.
pub const FALLBACK_STATUS: u16 = 410;

/// Message used when nothing more specific is available.
pub const GENERIC_MESSAGE: &str = "Error occurred";

const CACHE_CAPACITY: u64 = 1000;

// =============================================================================
// RemoteError
// =============================================================================

/// A failed catalog request, normalized.
///
/// `status` is the HTTP status, or [`FALLBACK_STATUS`] for transport failures,
/// undecodable bodies and 2xx responses other than 200. `message` prefers the
/// server's own message, then the failure text, then [`GENERIC_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} (status {status})")]
pub struct RemoteError {
    pub status: u16,
    pub message: String,
    pub errors: Vec<String>,
}

impl RemoteError {
    /// Build from a non-2xx response and its raw body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let (server_message, errors) = body_details(body);
        Self {
            status,
            message: server_message
                .unwrap_or_else(|| format!("Request failed with status code {status}")),
            errors,
        }
    }

    /// Build from a 2xx response other than 200.
    ///
    /// The request itself succeeded, so there is no status to report and the
    /// failure text is generic.
    #[must_use]
    pub fn from_unexpected_success(body: &str) -> Self {
        let (server_message, errors) = body_details(body);
        Self {
            status: FALLBACK_STATUS,
            message: server_message.unwrap_or_else(|| GENERIC_MESSAGE.to_string()),
            errors,
        }
    }

    /// Build from a transport-level failure.
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        Self {
            status: err.status().map_or(FALLBACK_STATUS, |s| s.as_u16()),
            message: message_or_generic(err.to_string()),
            errors: Vec::new(),
        }
    }

    /// Build from a 200 response whose body could not be decoded.
    #[must_use]
    pub fn from_decode(err: &serde_json::Error) -> Self {
        Self {
            status: FALLBACK_STATUS,
            message: message_or_generic(err.to_string()),
            errors: Vec::new(),
        }
    }
}

/// Server `message` and `errors` from a response body, when it is JSON.
fn body_details(body: &str) -> (Option<String>, Vec<String>) {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();

    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(ToOwned::to_owned);

    let errors = match parsed.as_ref().and_then(|v| v.get("errors")) {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(serde_json::Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    };

    (message, errors)
}

fn message_or_generic(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_MESSAGE.to_string()
    } else {
        message
    }
}

// =============================================================================
// CatalogApi
// =============================================================================

/// The three read operations the state controller needs.
///
/// Implemented by [`CatalogClient`]; tests substitute in-memory fakes.
pub trait CatalogApi: Send + Sync {
    /// Fetch one listing page, honoring the search > category > all precedence.
    fn list_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<ProductPage, RemoteError>> + Send;

    /// Fetch the category names.
    fn list_categories(&self) -> impl Future<Output = Result<Vec<String>, RemoteError>> + Send;

    /// Fetch one product's detail.
    fn get_product_detail(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<ProductDetail, RemoteError>> + Send;
}

// =============================================================================
// CatalogClient
// =============================================================================

/// HTTP client for the remote catalog.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base: String,
    cache: Option<Cache<CacheKey, CacheValue>>,
}

impl CatalogClient {
    /// Create a client from the storefront configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::from_parts(&config.api_url, config.cache_ttl)
    }

    /// Create a client for `api_url`, caching for `cache_ttl` (zero disables).
    #[must_use]
    pub fn from_parts(api_url: &Url, cache_ttl: Duration) -> Self {
        let cache = (!cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(cache_ttl)
                .build()
        });

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base: api_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// The URL a listing query is sent to.
    #[must_use]
    pub fn listing_url(&self, query: &ProductQuery) -> String {
        let base = &self.inner.base;
        match query.route() {
            ListingRoute::Search(q) => {
                format!("{base}/search/?{}", pagination_params(query, q))
            }
            ListingRoute::Category(name) => {
                format!("{base}/category/{}", urlencoding::encode(name))
            }
            ListingRoute::All => format!("{base}/?{}", pagination_params(query, "")),
        }
    }

    /// Issue a GET and decode a 200 body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let response = self.inner.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, url, "Catalog request failed");
            RemoteError::from_transport(&e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::from_transport(&e))?;

        if status != reqwest::StatusCode::OK {
            warn!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Catalog returned non-200 status"
            );
            if status.is_success() {
                return Err(RemoteError::from_unexpected_success(&body));
            }
            return Err(RemoteError::from_response(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            RemoteError::from_decode(&e)
        })
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    async fn cached(&self, key: &CacheKey) -> Option<CacheValue> {
        match &self.inner.cache {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    async fn store(&self, key: CacheKey, value: CacheValue) {
        if let Some(cache) = &self.inner.cache {
            cache.insert(key, value).await;
        }
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate_all();
            cache.run_pending_tasks().await;
        }
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip(self))]
    async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, RemoteError> {
        let url = self.listing_url(query);
        debug!(url = %url, "Fetching product listing");
        self.get_json(&url).await
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<String>, RemoteError> {
        if let Some(CacheValue::Categories(categories)) = self.cached(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let url = format!("{}/category-list", self.inner.base);
        let categories: Vec<String> = self.get_json(&url).await?;

        self.store(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product_detail(&self, id: ProductId) -> Result<ProductDetail, RemoteError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(detail)) = self.cached(&key).await {
            debug!("Cache hit for product");
            return Ok(*detail);
        }

        let url = format!("{}/{id}", self.inner.base);
        let detail: ProductDetail = self.get_json(&url).await?;

        self.store(key, CacheValue::Product(Box::new(detail.clone())))
            .await;
        Ok(detail)
    }
}

/// `skip`, `limit` and `q` in the order the catalog expects.
fn pagination_params(query: &ProductQuery, q: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("skip", &query.skip.to_string())
        .append_pair("limit", &query.limit.to_string())
        .append_pair("q", q)
        .finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, ttl: Duration) -> CatalogClient {
        let url = Url::parse(&format!("{}/products", server.uri())).unwrap();
        CatalogClient::from_parts(&url, ttl)
    }

    fn offline_client() -> CatalogClient {
        let url = Url::parse("https://catalog.test/products").unwrap();
        CatalogClient::from_parts(&url, Duration::ZERO)
    }

    fn product_json(id: u64) -> serde_json::Value {
        json!({
            "id": id, "title": format!("Product {id}"), "description": "d",
            "price": 10.5, "rating": 4.2, "category": "beauty", "thumbnail": "t.png"
        })
    }

    #[test]
    fn test_listing_urls() {
        let client = offline_client();

        let all = ProductQuery {
            skip: 20,
            limit: 10,
            category: None,
            query: None,
        };
        assert_eq!(
            client.listing_url(&all),
            "https://catalog.test/products/?skip=20&limit=10&q="
        );

        let search = ProductQuery {
            query: Some("red phone".to_string()),
            category: Some("smartphones".to_string()),
            ..all.clone()
        };
        assert_eq!(
            client.listing_url(&search),
            "https://catalog.test/products/search/?skip=20&limit=10&q=red+phone"
        );

        let category = ProductQuery {
            category: Some("home decoration".to_string()),
            ..all
        };
        assert_eq!(
            client.listing_url(&category),
            "https://catalog.test/products/category/home%20decoration"
        );
    }

    #[test]
    fn test_remote_error_from_response_with_message() {
        let err = RemoteError::from_response(
            404,
            r#"{"message": "Product with id '999' not found", "errors": ["missing", 3]}"#,
        );
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Product with id '999' not found");
        assert_eq!(err.errors, vec!["missing".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_remote_error_from_response_without_body() {
        let err = RemoteError::from_response(500, "");
        assert_eq!(err.status, 500);
        assert_eq!(err.message, "Request failed with status code 500");
        assert!(err.errors.is_empty());
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::from_response(503, r#"{"message": "down"}"#);
        assert_eq!(err.to_string(), "down (status 503)");
    }

    #[test]
    fn test_message_or_generic() {
        assert_eq!(message_or_generic("  ".to_string()), GENERIC_MESSAGE);
        assert_eq!(message_or_generic("boom".to_string()), "boom");
    }

    #[tokio::test]
    async fn test_list_products_plain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/"))
            .and(query_param("skip", "0"))
            .and(query_param("limit", "10"))
            .and(query_param("q", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [product_json(1), product_json(2)],
                "total": 35, "skip": 0, "limit": 10
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server, Duration::ZERO)
            .list_products(&ProductQuery::page(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total, 35);
        assert_eq!(page.products.len(), 2);
    }

    #[tokio::test]
    async fn test_search_ignores_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/search/"))
            .and(query_param("q", "phone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [product_json(7)], "total": 1, "skip": 0, "limit": 30
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products/category/smartphones"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let query = ProductQuery {
            skip: 0,
            limit: 30,
            category: Some("smartphones".to_string()),
            query: Some("phone".to_string()),
        };
        let page = client_for(&server, Duration::ZERO)
            .list_products(&query)
            .await
            .unwrap();
        assert_eq!(page.products[0].id, ProductId::new(7));
    }

    #[tokio::test]
    async fn test_category_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/category/beauty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [product_json(1)], "total": 5, "skip": 0, "limit": 5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = ProductQuery {
            category: Some("beauty".to_string()),
            ..ProductQuery::page(1, 30)
        };
        let page = client_for(&server, Duration::ZERO)
            .list_products(&query)
            .await
            .unwrap();
        assert_eq!(page.total, 5);
    }

    #[tokio::test]
    async fn test_non_200_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/999"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "Product with id '999' not found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::ZERO)
            .get_product_detail(ProductId::new(999))
            .await
            .unwrap_err();
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Product with id '999' not found");
        assert!(err.errors.is_empty());
    }

    #[tokio::test]
    async fn test_non_200_success_range_is_still_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/category-list"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::ZERO)
            .list_categories()
            .await
            .unwrap_err();
        assert_eq!(err.status, FALLBACK_STATUS);
        assert_eq!(err.message, GENERIC_MESSAGE);
        assert!(err.errors.is_empty());
    }

    #[test]
    fn test_unexpected_success_keeps_body_message() {
        let err = RemoteError::from_unexpected_success(
            r#"{"message": "Accepted for processing", "errors": ["queued"]}"#,
        );
        assert_eq!(err.status, FALLBACK_STATUS);
        assert_eq!(err.message, "Accepted for processing");
        assert_eq!(err.errors, vec!["queued".to_string()]);
    }

    #[tokio::test]
    async fn test_undecodable_body_defaults_to_410() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/category-list"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::ZERO)
            .list_categories()
            .await
            .unwrap_err();
        assert_eq!(err.status, FALLBACK_STATUS);
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_defaults_to_410() {
        // Nothing listens on port 1.
        let url = Url::parse("http://127.0.0.1:1/products").unwrap();
        let client = CatalogClient::from_parts(&url, Duration::ZERO);

        let err = client.list_categories().await.unwrap_err();
        assert_eq!(err.status, FALLBACK_STATUS);
        assert!(!err.message.is_empty());
        assert!(err.errors.is_empty());
    }

    #[tokio::test]
    async fn test_detail_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(3)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(300));
        let first = client.get_product_detail(ProductId::new(3)).await.unwrap();
        let second = client.get_product_detail(ProductId::new(3)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cache_disabled_and_invalidation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/category-list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["beauty", "groceries"])))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(300));
        assert_eq!(client.list_categories().await.unwrap().len(), 2);
        client.invalidate_all().await;
        assert_eq!(client.list_categories().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/5"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(300));
        assert!(client.get_product_detail(ProductId::new(5)).await.is_err());
        assert!(client.get_product_detail(ProductId::new(5)).await.is_err());
    }
}
