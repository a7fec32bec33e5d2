//! Application state shared across views.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::db::{FileStore, KeyValueStore};
use crate::services::auth::{AccountService, PasswordCipher};
use crate::store::{CatalogController, CatalogStore};

/// Application state shared across all views.
///
/// This struct is cheaply cloneable via `Arc` and owns the catalog
/// controller, its state store and the account service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogController<CatalogClient>,
    accounts: AccountService,
}

impl AppState {
    /// Create application state backed by the file store in the configured
    /// data directory.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = Arc::new(FileStore::in_dir(&config.data_dir));
        Self::with_store(config, store)
    }

    /// Create application state over an explicit key-value store.
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Arc<dyn KeyValueStore>) -> Self {
        if config.uses_embedded_secret() {
            debug!("Passwords are encrypted with the embedded key; set SHOPFRONT_CIPHER_SECRET to override");
        }

        let catalog = CatalogController::new(CatalogClient::new(&config), CatalogStore::new());
        let accounts = AccountService::new(store, PasswordCipher::new(&config.cipher_secret));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                accounts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog controller.
    #[must_use]
    pub fn catalog(&self) -> &CatalogController<CatalogClient> {
        &self.inner.catalog
    }

    /// Get a reference to the catalog state store.
    #[must_use]
    pub fn store(&self) -> &CatalogStore {
        self.inner.catalog.store()
    }

    /// Get a reference to the account service.
    #[must_use]
    pub fn accounts(&self) -> &AccountService {
        &self.inner.accounts
    }
}
