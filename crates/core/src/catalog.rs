//! Products and category filtering.
//!
//! A [`Product`] carries its price in its canonical unit plus the list of
//! units a customer may buy it in. [`Product::validate`] enforces that every
//! purchasable unit can be priced from the canonical one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, Unit};

/// Label of the pseudo-category that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Errors raised when a product definition is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("price cannot be negative: {0}")]
    NegativePrice(Decimal),
    #[error("canonical unit {0} is not among the purchasable units")]
    CanonicalUnitNotOffered(Unit),
    #[error("unit {unit} cannot be converted from canonical unit {canonical}")]
    IncompatibleUnit { canonical: Unit, unit: Unit },
    #[error("rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(Decimal),
}

/// A product offered on the ordering page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Canonical unit; `price` is denominated in it.
    pub unit: Unit,
    /// Price per canonical unit.
    pub price: Decimal,
    pub category: String,
    pub in_stock: bool,
    pub rating: Option<Decimal>,
    /// Units the product may be purchased in. Always contains `unit`.
    pub available_units: Vec<Unit>,
}

impl Product {
    /// Create an in-stock product purchasable only in its canonical unit.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        unit: Unit,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit,
            price,
            category: category.into(),
            in_stock: true,
            rating: None,
            available_units: vec![unit],
        }
    }

    /// Offer every unit of the canonical unit's family.
    #[must_use]
    pub fn with_family_units(mut self) -> Self {
        self.available_units = self.unit.family().table().units();
        self
    }

    /// Replace the purchasable units.
    #[must_use]
    pub fn with_units(mut self, units: &[Unit]) -> Self {
        self.available_units = units.to_vec();
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: Decimal) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Whether `unit` may be selected for this product.
    #[must_use]
    pub fn offers(&self, unit: Unit) -> bool {
        self.available_units.contains(&unit)
    }

    /// Check the product's invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(ProductError::NegativePrice(self.price));
        }
        if !self.offers(self.unit) {
            return Err(ProductError::CanonicalUnitNotOffered(self.unit));
        }

        let table = self.unit.family().table();
        if let Some(unit) = self
            .available_units
            .iter()
            .find(|unit| table.factor(**unit).is_none())
        {
            return Err(ProductError::IncompatibleUnit {
                canonical: self.unit,
                unit: *unit,
            });
        }

        if let Some(rating) = self.rating
            && (rating < Decimal::ZERO || rating > Decimal::from(5))
        {
            return Err(ProductError::RatingOutOfRange(rating));
        }

        Ok(())
    }
}

/// Category selection on the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Build a filter from a query-string value; blank and "All" select everything.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | ALL_CATEGORIES) => Self::All,
            Some(name) => Self::Named(name.to_string()),
        }
    }

    /// Whether the product belongs to the selected category.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => product.category == *name,
        }
    }

    /// Label of the selected category.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }
}

/// Category labels for the filter bar: "All" followed by each distinct
/// category in order of first appearance.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut labels = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if !labels.iter().any(|label| *label == product.category) {
            labels.push(product.category.clone());
        }
    }
    labels
}

/// Products matching the filter, in catalog order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], filter: &CategoryFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// The store's built-in catalog.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    let item = |id: i32, name: &str, price: i64, unit: Unit, category: &str, rating: i64| {
        Product::new(ProductId::from(id), name, Decimal::from(price), unit, category)
            .with_family_units()
            .with_rating(Decimal::new(rating, 1))
    };

    vec![
        item(1, "Basmati Rice", 120, Unit::Kilogram, "Grains", 45),
        item(2, "Whole Wheat Flour", 45, Unit::Kilogram, "Grains", 43),
        item(3, "Toor Dal", 85, Unit::Kilogram, "Pulses", 44),
        item(4, "Refined Oil", 110, Unit::Litre, "Oils", 42),
        item(5, "Onions", 25, Unit::Kilogram, "Vegetables", 41),
        item(6, "Potatoes", 20, Unit::Kilogram, "Vegetables", 40),
        item(7, "Tomatoes", 35, Unit::Kilogram, "Vegetables", 42),
        item(8, "Milk", 50, Unit::Litre, "Dairy", 46),
        item(9, "Eggs", 6, Unit::Piece, "Dairy", 43),
        item(10, "Bread", 25, Unit::Loaf, "Bakery", 41),
        item(11, "Sugar", 42, Unit::Kilogram, "Essentials", 42),
        item(12, "Salt", 18, Unit::Kilogram, "Essentials", 44),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 12);
        for product in &catalog {
            assert_eq!(product.validate(), Ok(()), "{}", product.name);
        }
    }

    #[test]
    fn test_default_catalog_units() {
        let catalog = default_catalog();
        let rice = &catalog[0];
        assert_eq!(rice.available_units, vec![Unit::Kilogram, Unit::Gram]);
        let bread = &catalog[9];
        assert_eq!(bread.available_units, vec![Unit::Loaf]);
    }

    #[test]
    fn test_validate_rejects_cross_family_unit() {
        let product = Product::new(
            ProductId::from(1),
            "Rice",
            Decimal::from(120),
            Unit::Kilogram,
            "Grains",
        )
        .with_units(&[Unit::Kilogram, Unit::Millilitre]);
        assert_eq!(
            product.validate(),
            Err(ProductError::IncompatibleUnit {
                canonical: Unit::Kilogram,
                unit: Unit::Millilitre
            })
        );
    }

    #[test]
    fn test_validate_requires_canonical_unit() {
        let product = Product::new(
            ProductId::from(1),
            "Rice",
            Decimal::from(120),
            Unit::Kilogram,
            "Grains",
        )
        .with_units(&[Unit::Gram]);
        assert_eq!(
            product.validate(),
            Err(ProductError::CanonicalUnitNotOffered(Unit::Kilogram))
        );
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let product = Product::new(
            ProductId::from(1),
            "Rice",
            Decimal::from(-1),
            Unit::Kilogram,
            "Grains",
        );
        assert!(matches!(
            product.validate(),
            Err(ProductError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let labels = categories(&default_catalog());
        assert_eq!(
            labels,
            vec![
                "All",
                "Grains",
                "Pulses",
                "Oils",
                "Vegetables",
                "Dairy",
                "Bakery",
                "Essentials"
            ]
        );
    }

    #[test]
    fn test_filter_products() {
        let catalog = default_catalog();
        let dairy = filter_products(&catalog, &CategoryFilter::Named("Dairy".to_string()));
        let names: Vec<_> = dairy.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Eggs"]);

        let all = filter_products(&catalog, &CategoryFilter::All);
        assert_eq!(all.len(), catalog.len());
    }

    #[test]
    fn test_category_filter_from_query() {
        assert_eq!(CategoryFilter::from_query(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_query(Some("All")), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_query(Some(" ")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_query(Some("Oils")),
            CategoryFilter::Named("Oils".to_string())
        );
    }
}
