//! Application state shared across handlers.

use std::sync::Arc;

use crate::cache::CatalogCache;
use crate::config::AdminConfig;
use crate::db::ProductStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: CatalogCache<ProductStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The product list starts empty; it is loaded on the first page view.
    #[must_use]
    pub fn new(config: AdminConfig, store: ProductStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: CatalogCache::new(store),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The products table and its local copy.
    #[must_use]
    pub fn catalog(&self) -> &CatalogCache<ProductStore> {
        &self.inner.catalog
    }
}
