//! Product sources for the ordering page.
//!
//! The page only ever asks for the current product list. Where the list comes
//! from is decided at startup: the built-in catalog, or the hosted products
//! table read through [`RemoteCatalog`].

mod builtin;
mod remote;

use std::future::Future;
use std::sync::Arc;

use kirana_core::Product;
use thiserror::Error;

pub use builtin::StaticCatalog;
pub use remote::{ProductRow, RemoteCatalog, product_from_row};

/// Errors raised while listing products.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Something that can list the products on offer.
pub trait CatalogProvider {
    /// Current products, in display order.
    fn list(&self) -> impl Future<Output = Result<Arc<[Product]>, CatalogError>> + Send;
}

/// The provider chosen at startup.
#[derive(Clone)]
pub enum CatalogSource {
    Static(StaticCatalog),
    Remote(RemoteCatalog),
}

impl CatalogSource {
    /// Whether the source's backing store is reachable.
    pub async fn is_ready(&self) -> bool {
        match self {
            Self::Static(_) => true,
            Self::Remote(remote) => remote.ping().await.is_ok(),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Remote(_) => "remote",
        }
    }
}

impl CatalogProvider for CatalogSource {
    async fn list(&self) -> Result<Arc<[Product]>, CatalogError> {
        match self {
            Self::Static(catalog) => catalog.list().await,
            Self::Remote(catalog) => catalog.list().await,
        }
    }
}

impl From<StaticCatalog> for CatalogSource {
    fn from(catalog: StaticCatalog) -> Self {
        Self::Static(catalog)
    }
}

impl From<RemoteCatalog> for CatalogSource {
    fn from(catalog: RemoteCatalog) -> Self {
        Self::Remote(catalog)
    }
}
