//! Products table migrations.

use super::DatabaseCommandError;

/// Apply pending migrations from `crates/admin/migrations`.
pub async fn run() -> Result<(), DatabaseCommandError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
