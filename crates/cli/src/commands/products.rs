//! Products table commands.

use std::collections::HashSet;

use kirana_admin::db::{PgProductTable, ProductTable};
use kirana_admin::models::ProductFields;
use kirana_core::catalog::default_catalog;
use kirana_core::format_amount;

use super::DatabaseCommandError;

/// Insert every built-in product whose name is not already in the table.
///
/// Returns the number of rows inserted.
pub async fn seed(stock: i32) -> Result<usize, DatabaseCommandError> {
    let table = PgProductTable::new(super::connect().await?);

    let existing: HashSet<String> = table.list().await?.into_iter().map(|p| p.name).collect();

    let mut inserted = 0;
    for product in default_catalog() {
        if existing.contains(&product.name) {
            tracing::info!("Skipping {} (already listed)", product.name);
            continue;
        }
        let created = table
            .insert(&ProductFields::from_catalog(&product, stock))
            .await?;
        tracing::info!("Inserted {} as {}", created.name, created.id);
        inserted += 1;
    }

    tracing::info!("Seeded {inserted} products");
    Ok(inserted)
}

/// Log every row of the products table, newest first.
pub async fn list() -> Result<(), DatabaseCommandError> {
    let table = PgProductTable::new(super::connect().await?);
    let products = table.list().await?;

    for product in &products {
        tracing::info!(
            "{}  {:<24} {:<12} \u{20b9}{:>9}  stock {}",
            product.id,
            product.name,
            product.category,
            format_amount(product.price),
            product.stock_quantity
        );
    }
    tracing::info!("{} products", products.len());

    Ok(())
}
