//! The store's built-in product list.

use std::sync::Arc;

use kirana_core::Product;
use kirana_core::catalog::default_catalog;

use super::{CatalogError, CatalogProvider};

/// A fixed list of products held in memory.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Arc<[Product]>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

impl CatalogProvider for StaticCatalog {
    async fn list(&self) -> Result<Arc<[Product]>, CatalogError> {
        Ok(Arc::clone(&self.products))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_lists_built_in_products() {
        let products = StaticCatalog::default().list().await.unwrap();
        assert_eq!(products.len(), 12);
        assert_eq!(products[0].name, "Basmati Rice");
    }
}
