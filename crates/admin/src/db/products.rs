//! `PostgreSQL` products repository.

use chrono::{DateTime, Utc};
use kirana_core::RecordId;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use super::{ProductTable, RepositoryError};
use crate::models::{AdminProduct, ProductFields};

const COLUMNS: &str =
    "id, name, description, price, category, stock_quantity, image_url, created_at, updated_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: RecordId,
    name: String,
    description: Option<String>,
    price: Decimal,
    category: String,
    stock_quantity: i32,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for AdminProduct {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        if row.price.is_sign_negative() {
            return Err(RepositoryError::DataCorruption(format!(
                "negative price for product {}",
                row.id
            )));
        }

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            stock_quantity: row.stock_quantity,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Products table in `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgProductTable {
    pool: PgPool,
}

impl PgProductTable {
    /// Create a new products repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check database connectivity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the pool cannot run a query.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

impl ProductTable for PgProductTable {
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<AdminProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    #[instrument(skip(self, fields))]
    async fn insert(&self, fields: &ProductFields) -> Result<AdminProduct, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, description, price, category, stock_quantity, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(fields.stock_quantity)
        .bind(&fields.image_url)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the id.
    #[instrument(skip(self, fields), fields(id = %id))]
    async fn update(
        &self,
        id: RecordId,
        fields: &ProductFields,
    ) -> Result<AdminProduct, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products
             SET name = $2, description = $3, price = $4, category = $5,
                 stock_quantity = $6, image_url = $7, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(fields.stock_quantity)
        .bind(&fields.image_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the id.
    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
