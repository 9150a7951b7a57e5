//! Subcommand implementations.

pub mod migrate;
pub mod products;
pub mod quote;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors from commands that talk to the database.
#[derive(Debug, Error)]
pub enum DatabaseCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Products table operation failed.
    #[error("Products table error: {0}")]
    Repository(#[from] kirana_admin::db::RepositoryError),
}

/// Connect to the products database.
async fn connect() -> Result<PgPool, DatabaseCommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| DatabaseCommandError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(kirana_admin::db::create_pool(&SecretString::from(database_url)).await?)
}
