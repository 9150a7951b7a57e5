//! Access to the hosted `products` table.
//!
//! # Tables
//!
//! - `products` - The store's product list, shared with the storefront
//!   (which reads it when `CATALOG_SOURCE=remote`)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p kirana-cli -- migrate
//! ```
//!
//! Without a configured database the panel manages an in-process table,
//! which starts out holding the built-in catalog.

pub mod memory;
pub mod products;

use std::future::Future;
use std::time::Duration;

use kirana_core::RecordId;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use memory::MemoryProductTable;
pub use products::PgProductTable;

use crate::models::{AdminProduct, ProductFields};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// The table could not be reached.
    #[error("product table unavailable")]
    Unavailable,
}

/// The remote product table.
///
/// Every call is a single round trip; callers decide what to do with the
/// locally held copy afterwards.
pub trait ProductTable: Send + Sync {
    /// All products, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<AdminProduct>, RepositoryError>> + Send;

    /// Insert a product and return the stored record.
    fn insert(
        &self,
        fields: &ProductFields,
    ) -> impl Future<Output = Result<AdminProduct, RepositoryError>> + Send;

    /// Overwrite a product's editable fields.
    fn update(
        &self,
        id: RecordId,
        fields: &ProductFields,
    ) -> impl Future<Output = Result<AdminProduct, RepositoryError>> + Send;

    /// Delete a product.
    fn delete(&self, id: RecordId) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// The table chosen at startup.
#[derive(Clone)]
pub enum ProductStore {
    Postgres(PgProductTable),
    Memory(MemoryProductTable),
}

impl ProductStore {
    /// Whether the backing store is reachable.
    pub async fn is_ready(&self) -> bool {
        match self {
            Self::Postgres(table) => table.ping().await.is_ok(),
            Self::Memory(table) => !table.is_failing(),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

impl ProductTable for ProductStore {
    async fn list(&self) -> Result<Vec<AdminProduct>, RepositoryError> {
        match self {
            Self::Postgres(table) => table.list().await,
            Self::Memory(table) => table.list().await,
        }
    }

    async fn insert(&self, fields: &ProductFields) -> Result<AdminProduct, RepositoryError> {
        match self {
            Self::Postgres(table) => table.insert(fields).await,
            Self::Memory(table) => table.insert(fields).await,
        }
    }

    async fn update(
        &self,
        id: RecordId,
        fields: &ProductFields,
    ) -> Result<AdminProduct, RepositoryError> {
        match self {
            Self::Postgres(table) => table.update(id, fields).await,
            Self::Memory(table) => table.update(id, fields).await,
        }
    }

    async fn delete(&self, id: RecordId) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(table) => table.delete(id).await,
            Self::Memory(table) => table.delete(id).await,
        }
    }
}

impl From<PgProductTable> for ProductStore {
    fn from(table: PgProductTable) -> Self {
        Self::Postgres(table)
    }
}

impl From<MemoryProductTable> for ProductStore {
    fn from(table: MemoryProductTable) -> Self {
        Self::Memory(table)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
