//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_flow` - Catalog client, controller and state store against a
//!   mock catalog server
//! - `account_flow` - Account flows over the on-disk store
//!
//! Every test gets its own mock server and data directory from
//! [`TestContext`], so tests run in parallel.

use std::sync::Arc;

use serde_json::{Value, json};
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::db::FileStore;
use shopfront_storefront::state::AppState;
use tempfile::TempDir;
use url::Url;
use wiremock::MockServer;

/// A mock catalog, a scratch data directory and app state wired to both.
pub struct TestContext {
    pub server: MockServer,
    pub data_dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Start a mock catalog and build app state over a fresh data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let data_dir = tempfile::tempdir().expect("Failed to create data directory");
        let state = build_state(&server, &data_dir);
        Self {
            server,
            data_dir,
            state,
        }
    }

    /// Fresh app state over the same data directory, as a new process would
    /// see it.
    #[must_use]
    pub fn reopen(&self) -> AppState {
        build_state(&self.server, &self.data_dir)
    }

    /// Path of the on-disk key-value store.
    #[must_use]
    pub fn store_path(&self) -> std::path::PathBuf {
        self.data_dir.path().join(FileStore::FILE_NAME)
    }
}

fn build_state(server: &MockServer, data_dir: &TempDir) -> AppState {
    let api_url = Url::parse(&format!("{}/products", server.uri()))
        .expect("Mock server URI is a valid URL");
    let config = StorefrontConfig::with_defaults(api_url, data_dir.path().to_path_buf());
    let store = Arc::new(FileStore::in_dir(&config.data_dir));
    AppState::with_store(config, store)
}

/// A listing entry as the catalog returns it.
#[must_use]
pub fn product_json(id: u64) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "description": format!("Description of product {id}"),
        "price": 9.99,
        "rating": 4.5,
        "category": "beauty",
        "thumbnail": format!("https://cdn.example.com/{id}/thumbnail.png")
    })
}

/// A listing page holding products `skip + 1 ..= skip + count`.
#[must_use]
pub fn page_json(total: u64, skip: u64, limit: u64, count: u64) -> Value {
    let products: Vec<Value> = (skip + 1..=skip + count).map(product_json).collect();
    json!({
        "products": products,
        "total": total,
        "skip": skip,
        "limit": limit
    })
}

/// A full product detail record.
#[must_use]
pub fn detail_json(id: u64) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "description": "Detailed description",
        "category": "beauty",
        "price": 9.99,
        "discountPercentage": 7.17,
        "rating": 4.94,
        "stock": 5,
        "tags": ["beauty", "mascara"],
        "brand": "Essence",
        "sku": "RCH45Q1A",
        "weight": 2,
        "dimensions": {"width": 23.17, "height": 14.43, "depth": 28.01},
        "warrantyInformation": "1 month warranty",
        "shippingInformation": "Ships in 1 month",
        "availabilityStatus": "Low Stock",
        "reviews": [{
            "rating": 2,
            "comment": "Very unhappy with my purchase!",
            "date": "2024-05-23T08:56:21.618Z",
            "reviewerName": "John Doe",
            "reviewerEmail": "john.doe@x.dummyjson.com"
        }],
        "returnPolicy": "30 days return policy",
        "minimumOrderQuantity": 24,
        "meta": {
            "createdAt": "2024-05-23T08:56:21.618Z",
            "updatedAt": "2024-05-23T08:56:21.618Z",
            "barcode": "9164035109868",
            "qrCode": "https://assets.dummyjson.com/public/qr-code.png"
        },
        "images": [format!("https://cdn.example.com/{id}/1.png")],
        "thumbnail": format!("https://cdn.example.com/{id}/thumbnail.png")
    })
}
