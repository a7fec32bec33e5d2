//! Fetch-and-dispatch glue between the catalog client and the store.

use shopfront_core::ProductId;
use tracing::{info, instrument, warn};

use super::{Action, CatalogStore};
use crate::catalog::{CatalogApi, ProductDetail, ProductPage, ProductQuery, RemoteError};

/// Runs catalog requests and records their lifecycle in a [`CatalogStore`].
///
/// Each load dispatches `Pending`, awaits the client, then dispatches
/// `Fulfilled` or `Rejected`. Loads may overlap; nothing correlates a response
/// with the request that is newest, so the last one to settle wins.
pub struct CatalogController<C> {
    api: C,
    store: CatalogStore,
}

impl<C: CatalogApi> CatalogController<C> {
    /// Create a controller writing into `store`.
    pub const fn new(api: C, store: CatalogStore) -> Self {
        Self { api, store }
    }

    /// The store this controller writes to.
    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// The underlying catalog client.
    pub const fn api(&self) -> &C {
        &self.api
    }

    /// Load one listing page.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure after recording it in the store.
    #[instrument(skip(self))]
    pub async fn load_products(&self, query: &ProductQuery) -> Result<ProductPage, RemoteError> {
        self.store.dispatch(Action::ProductListPending);
        match self.api.list_products(query).await {
            Ok(page) => {
                info!(total = page.total, count = page.products.len(), "Product list loaded");
                self.store.dispatch(Action::ProductListFulfilled(page.clone()));
                Ok(page)
            }
            Err(err) => {
                warn!(status = err.status, message = %err.message, "Product list failed");
                self.store.dispatch(Action::ProductListRejected(err.clone()));
                Err(err)
            }
        }
    }

    /// Load the category names.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure after recording it in the store.
    #[instrument(skip(self))]
    pub async fn load_categories(&self) -> Result<Vec<String>, RemoteError> {
        self.store.dispatch(Action::CategoriesPending);
        match self.api.list_categories().await {
            Ok(categories) => {
                self.store
                    .dispatch(Action::CategoriesFulfilled(categories.clone()));
                Ok(categories)
            }
            Err(err) => {
                warn!(status = err.status, message = %err.message, "Categories failed");
                self.store.dispatch(Action::CategoriesRejected(err.clone()));
                Err(err)
            }
        }
    }

    /// Load one product's detail.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure after recording it in the store.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn load_product(&self, id: ProductId) -> Result<ProductDetail, RemoteError> {
        self.store.dispatch(Action::ProductDetailPending);
        match self.api.get_product_detail(id).await {
            Ok(detail) => {
                self.store
                    .dispatch(Action::ProductDetailFulfilled(Box::new(detail.clone())));
                Ok(detail)
            }
            Err(err) => {
                warn!(status = err.status, message = %err.message, "Product detail failed");
                self.store.dispatch(Action::ProductDetailRejected(err.clone()));
                Err(err)
            }
        }
    }
}
