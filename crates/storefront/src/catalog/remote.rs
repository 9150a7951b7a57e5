//! Products read from the hosted `products` table.
//!
//! The table only records a price and a stock count per row, so every product
//! is sold by the piece. The list is cached with `moka` for a configurable TTL
//! so the ordering page does not hit the database on every render.

use std::sync::Arc;
use std::time::Duration;

use kirana_core::{Product, ProductId, RecordId, Unit};
use moka::future::Cache;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use super::{CatalogError, CatalogProvider};

const LIST_KEY: &str = "products";

/// One row of the products table, as far as the ordering page cares.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: RecordId,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub stock_quantity: i32,
}

/// Convert a table row into an orderable product.
///
/// Returns `None` for rows that cannot be offered (e.g. a negative price).
#[must_use]
pub fn product_from_row(row: ProductRow) -> Option<Product> {
    let product = Product::new(
        ProductId::from(row.id),
        row.name,
        row.price,
        Unit::Piece,
        row.category,
    )
    .with_stock(row.stock_quantity > 0);

    match product.validate() {
        Ok(()) => Some(product),
        Err(e) => {
            warn!(product_id = %product.id, error = %e, "Skipping invalid product row");
            None
        }
    }
}

/// Catalog backed by the products table.
#[derive(Clone)]
pub struct RemoteCatalog {
    inner: Arc<RemoteCatalogInner>,
}

struct RemoteCatalogInner {
    pool: PgPool,
    cache: Cache<&'static str, Arc<[Product]>>,
}

impl RemoteCatalog {
    #[must_use]
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self {
            inner: Arc::new(RemoteCatalogInner { pool, cache }),
        }
    }

    /// Check database connectivity.
    ///
    /// # Errors
    ///
    /// Returns the database error if the pool cannot run a query.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        sqlx::query("SELECT 1").execute(&self.inner.pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<Arc<[Product]>, CatalogError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, category, stock_quantity
            FROM products
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.inner.pool)
        .await?;

        let products: Arc<[Product]> = rows.into_iter().filter_map(product_from_row).collect();
        debug!(count = products.len(), "Loaded products from table");
        Ok(products)
    }
}

impl CatalogProvider for RemoteCatalog {
    async fn list(&self) -> Result<Arc<[Product]>, CatalogError> {
        if let Some(products) = self.inner.cache.get(LIST_KEY).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let products = self.fetch().await?;
        self.inner
            .cache
            .insert(LIST_KEY, Arc::clone(&products))
            .await;
        Ok(products)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(price: i64, stock: i32) -> ProductRow {
        ProductRow {
            id: RecordId::generate(),
            name: "Ghee".to_string(),
            price: Decimal::from(price),
            category: "Dairy".to_string(),
            stock_quantity: stock,
        }
    }

    #[test]
    fn test_row_becomes_piece_product() {
        let source = row(550, 4);
        let id = source.id;
        let product = product_from_row(source).unwrap();
        assert_eq!(product.id, ProductId::from(id));
        assert_eq!(product.unit, Unit::Piece);
        assert_eq!(product.available_units, vec![Unit::Piece]);
        assert!(product.in_stock);
        assert!(product.rating.is_none());
    }

    #[test]
    fn test_zero_stock_is_out_of_stock() {
        assert!(!product_from_row(row(550, 0)).unwrap().in_stock);
    }

    #[test]
    fn test_negative_price_row_is_skipped() {
        assert!(product_from_row(row(-1, 3)).is_none());
    }
}
