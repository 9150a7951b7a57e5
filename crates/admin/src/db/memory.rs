//! In-process products table.
//!
//! Stands in for the hosted table when no database is configured, and in
//! tests. It can be switched into a failing state to exercise the paths where
//! the table cannot be reached.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use kirana_core::RecordId;
use kirana_core::catalog::default_catalog;
use tokio::sync::RwLock;

use super::{ProductTable, RepositoryError};
use crate::models::{AdminProduct, ProductFields};

/// Stock given to built-in products when seeding.
pub const SEED_STOCK: i32 = 100;

#[derive(Debug, Clone, Default)]
pub struct MemoryProductTable {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Rows in insertion order.
    rows: RwLock<Vec<AdminProduct>>,
    failing: AtomicBool,
}

impl MemoryProductTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding the built-in catalog.
    pub async fn seeded() -> Self {
        let table = Self::new();
        for product in default_catalog() {
            // Cannot fail: the table was just created in a working state
            let _ = table
                .insert(&ProductFields::from_catalog(&product, SEED_STOCK))
                .await;
        }
        table
    }

    /// Make every following call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_failing(&self) -> bool {
        self.inner.failing.load(Ordering::SeqCst)
    }

    /// Number of stored rows, regardless of the failing switch.
    pub async fn row_count(&self) -> usize {
        self.inner.rows.read().await.len()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.is_failing() {
            return Err(RepositoryError::Unavailable);
        }
        Ok(())
    }
}

impl ProductTable for MemoryProductTable {
    async fn list(&self) -> Result<Vec<AdminProduct>, RepositoryError> {
        self.check()?;
        let rows = self.inner.rows.read().await;
        // Newest insert first among equal timestamps (the sort is stable)
        let mut products: Vec<_> = rows.iter().rev().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn insert(&self, fields: &ProductFields) -> Result<AdminProduct, RepositoryError> {
        self.check()?;
        let product = AdminProduct::from_fields(RecordId::generate(), fields.clone(), Utc::now());
        self.inner.rows.write().await.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: RecordId,
        fields: &ProductFields,
    ) -> Result<AdminProduct, RepositoryError> {
        self.check()?;
        let mut rows = self.inner.rows.write().await;
        let product = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        product.apply(fields.clone(), Utc::now());
        Ok(product.clone())
    }

    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.inner.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
