//! Product records of the hosted `products` table.

use chrono::{DateTime, Utc};
use kirana_core::{Product, RecordId};
use rust_decimal::Decimal;
use serde::Serialize;

/// A row of the products table (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminProduct {
    /// Row id, assigned by the table on insert.
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    /// Price per piece in the store currency.
    pub price: Decimal,
    pub category: String,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminProduct {
    /// Build a record from its editable fields, as a table would on insert.
    #[must_use]
    pub fn from_fields(id: RecordId, fields: ProductFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            stock_quantity: fields.stock_quantity,
            image_url: fields.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields, keeping id and creation time.
    pub fn apply(&mut self, fields: ProductFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.category = fields.category;
        self.stock_quantity = fields.stock_quantity;
        self.image_url = fields.image_url;
        self.updated_at = now;
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

/// The editable part of a product record, as written by insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
}

impl ProductFields {
    /// Fields for listing a built-in catalog product in the table.
    #[must_use]
    pub fn from_catalog(product: &Product, stock_quantity: i32) -> Self {
        Self {
            name: product.name.clone(),
            description: Some(format!("Sold per {}", product.unit)),
            price: product.price,
            category: product.category.clone(),
            stock_quantity: stock_quantity.max(0),
            image_url: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kirana_core::catalog::default_catalog;

    use super::*;

    fn fields(name: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            description: None,
            price: Decimal::new(4500, 2),
            category: "Dairy".to_string(),
            stock_quantity: 3,
            image_url: None,
        }
    }

    #[test]
    fn test_apply_keeps_identity() {
        let created = Utc::now();
        let mut product = AdminProduct::from_fields(RecordId::generate(), fields("Paneer"), created);
        let id = product.id;

        let later = created + chrono::Duration::seconds(5);
        product.apply(fields("Fresh Paneer"), later);

        assert_eq!(product.id, id);
        assert_eq!(product.name, "Fresh Paneer");
        assert_eq!(product.created_at, created);
        assert_eq!(product.updated_at, later);
    }

    #[test]
    fn test_from_catalog() {
        let catalog = default_catalog();
        let rice = ProductFields::from_catalog(&catalog[0], -4);
        assert_eq!(rice.name, "Basmati Rice");
        assert_eq!(rice.price, Decimal::from(120));
        assert_eq!(rice.description.as_deref(), Some("Sold per kg"));
        assert_eq!(rice.stock_quantity, 0);
    }
}
