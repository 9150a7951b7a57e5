//! Local copy of the products table.
//!
//! The panel shows what it last read from the table. Every mutation is one
//! remote call followed by a full reload; nothing is patched in locally and
//! nothing is rolled back. A failed mutation or a failed reload leaves the
//! copy as it was.

use std::sync::Arc;

use kirana_core::RecordId;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{instrument, warn};

use crate::db::{ProductTable, RepositoryError};
use crate::models::{AdminProduct, ProductFields};

/// A table call made by the cache failed.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("loading products failed: {0}")]
    Load(#[source] RepositoryError),
    #[error("saving product failed: {0}")]
    Save(#[source] RepositoryError),
    #[error("deleting product failed: {0}")]
    Delete(#[source] RepositoryError),
}

impl CacheError {
    /// The underlying repository error.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryError {
        match self {
            Self::Load(e) | Self::Save(e) | Self::Delete(e) => e,
        }
    }
}

/// Whether the copy was refreshed after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadStatus {
    Reloaded,
    /// The mutation went through but the follow-up reload failed.
    Stale,
}

/// Outcome of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation<T> {
    pub value: T,
    pub reload: ReloadStatus,
}

/// Products table plus the list last read from it.
pub struct CatalogCache<T> {
    table: T,
    products: RwLock<Arc<[AdminProduct]>>,
    /// Serializes reloads so an older read never replaces a newer one.
    reload: Mutex<()>,
}

impl<T: ProductTable> CatalogCache<T> {
    /// An empty cache; call [`CatalogCache::load`] to fill it.
    #[must_use]
    pub fn new(table: T) -> Self {
        Self {
            table,
            products: RwLock::new(Arc::from(Vec::<AdminProduct>::new())),
            reload: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn table(&self) -> &T {
        &self.table
    }

    /// Replace the copy with the table's contents, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Load` and keeps the previous copy if the table
    /// cannot be read.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Arc<[AdminProduct]>, CacheError> {
        let _guard = self.reload.lock().await;
        let fresh: Arc<[AdminProduct]> = self.table.list().await.map_err(CacheError::Load)?.into();
        *self.products.write().await = Arc::clone(&fresh);
        tracing::debug!(count = fresh.len(), "Product list reloaded");
        Ok(fresh)
    }

    /// Insert a product, then reload.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Save` if the insert fails; the copy is untouched.
    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: &ProductFields) -> Result<Mutation<AdminProduct>, CacheError> {
        let created = self.table.insert(fields).await.map_err(CacheError::Save)?;
        Ok(Mutation {
            value: created,
            reload: self.reload_after_mutation().await,
        })
    }

    /// Overwrite a product, then reload.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Save` if the update fails; the copy is untouched.
    #[instrument(skip(self, fields), fields(id = %id))]
    pub async fn update(
        &self,
        id: RecordId,
        fields: &ProductFields,
    ) -> Result<Mutation<AdminProduct>, CacheError> {
        let updated = self
            .table
            .update(id, fields)
            .await
            .map_err(CacheError::Save)?;
        Ok(Mutation {
            value: updated,
            reload: self.reload_after_mutation().await,
        })
    }

    /// Delete a product, then reload.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Delete` if the delete fails; the copy is untouched.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: RecordId) -> Result<Mutation<()>, CacheError> {
        self.table.delete(id).await.map_err(CacheError::Delete)?;
        Ok(Mutation {
            value: (),
            reload: self.reload_after_mutation().await,
        })
    }

    /// The list as last loaded.
    pub async fn products(&self) -> Arc<[AdminProduct]> {
        Arc::clone(&*self.products.read().await)
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// A product from the loaded list.
    pub async fn find(&self, id: RecordId) -> Option<AdminProduct> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    async fn reload_after_mutation(&self) -> ReloadStatus {
        match self.load().await {
            Ok(_) => ReloadStatus::Reloaded,
            Err(e) => {
                warn!(error = %e, "Reload after mutation failed; product list is stale");
                ReloadStatus::Stale
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::db::MemoryProductTable;

    fn fields(name: &str, price: i64) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            description: None,
            price: Decimal::from(price),
            category: "Dairy".to_string(),
            stock_quantity: 5,
            image_url: None,
        }
    }

    async fn loaded(table: MemoryProductTable) -> CatalogCache<MemoryProductTable> {
        let cache = CatalogCache::new(table);
        cache.load().await.unwrap();
        cache
    }

    #[tokio::test]
    async fn test_create_reloads() {
        let cache = loaded(MemoryProductTable::new()).await;
        let created = cache.create(&fields("Butter", 56)).await.unwrap();
        assert_eq!(created.reload, ReloadStatus::Reloaded);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.find(created.value.id).await.unwrap().name, "Butter");
    }

    #[tokio::test]
    async fn test_failed_create_leaves_copy_unchanged() {
        let table = MemoryProductTable::new();
        let cache = loaded(table.clone()).await;
        cache.create(&fields("Butter", 56)).await.unwrap();

        table.set_failing(true);
        let err = cache.create(&fields("Cheese", 120)).await.unwrap_err();
        assert!(matches!(err, CacheError::Save(RepositoryError::Unavailable)));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_is_visible_after_reload() {
        let cache = loaded(MemoryProductTable::new()).await;
        let id = cache.create(&fields("Butter", 56)).await.unwrap().value.id;

        let updated = cache.update(id, &fields("Butter", 60)).await.unwrap();
        assert_eq!(updated.reload, ReloadStatus::Reloaded);
        assert_eq!(cache.find(id).await.unwrap().price, Decimal::from(60));
    }

    #[tokio::test]
    async fn test_delete_unknown_reports_error() {
        let cache = loaded(MemoryProductTable::new()).await;
        let err = cache.delete(RecordId::generate()).await.unwrap_err();
        assert!(matches!(err.repository(), RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_copy() {
        let table = MemoryProductTable::seeded().await;
        let cache = loaded(table.clone()).await;
        assert_eq!(cache.len().await, 12);

        table.set_failing(true);
        assert!(cache.load().await.is_err());
        assert_eq!(cache.len().await, 12);
    }

    /// Writes succeed, reads fail.
    struct WriteOnly(MemoryProductTable);

    impl ProductTable for WriteOnly {
        async fn list(&self) -> Result<Vec<AdminProduct>, RepositoryError> {
            Err(RepositoryError::Unavailable)
        }

        async fn insert(&self, fields: &ProductFields) -> Result<AdminProduct, RepositoryError> {
            self.0.insert(fields).await
        }

        async fn update(
            &self,
            id: RecordId,
            fields: &ProductFields,
        ) -> Result<AdminProduct, RepositoryError> {
            self.0.update(id, fields).await
        }

        async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
            self.0.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_failed_reload_reports_stale() {
        let table = MemoryProductTable::new();
        let cache = CatalogCache::new(WriteOnly(table.clone()));

        let created = cache.create(&fields("Lassi", 30)).await.unwrap();
        assert_eq!(created.reload, ReloadStatus::Stale);
        assert_eq!(table.row_count().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_external_change_seen_on_next_mutation() {
        let table = MemoryProductTable::new();
        let cache = loaded(table.clone()).await;

        // Written by someone else; last write wins and shows up on reload
        table.insert(&fields("Ghee", 550)).await.unwrap();
        assert_eq!(cache.len().await, 0);

        cache.create(&fields("Curd", 40)).await.unwrap();
        let names: Vec<_> = cache.products().await.iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Curd", "Ghee"]);
    }
}
