//! Unit price conversion and line pricing.
//!
//! A product's stored price is per canonical unit. Buying in another unit of
//! the same family re-denominates the price through the family's conversion
//! table: `price / (factor[unit] / factor[canonical])`.

use rust_decimal::Decimal;

use crate::catalog::Product;
use crate::types::{Unit, UnitError};

/// Errors raised while pricing a product.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// The unit is not one the product may be bought in.
    #[error("{product} is not sold by {unit}")]
    UnitNotOffered { product: String, unit: Unit },

    /// The unit cannot be converted from the product's canonical unit.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Arithmetic overflowed.
    #[error("price calculation overflowed")]
    Overflow,
}

/// Price of one `unit` of `product`.
///
/// # Errors
///
/// Returns [`PricingError::UnitNotOffered`] if the product does not list
/// `unit`, or [`PricingError::Unit`] if the unit belongs to another family.
pub fn unit_price(product: &Product, unit: Unit) -> Result<Decimal, PricingError> {
    if !product.offers(unit) {
        return Err(PricingError::UnitNotOffered {
            product: product.name.clone(),
            unit,
        });
    }

    if unit == product.unit {
        return Ok(product.price);
    }

    let table = product.unit.family().table();
    Ok(table.convert_price(product.price, product.unit, unit)?)
}

/// Price of `quantity` of `product` bought in `unit`.
///
/// # Errors
///
/// See [`unit_price`]; additionally fails with [`PricingError::Overflow`].
pub fn price_for(product: &Product, quantity: Decimal, unit: Unit) -> Result<Decimal, PricingError> {
    let per_unit = unit_price(product, unit)?;
    per_unit.checked_mul(quantity).ok_or(PricingError::Overflow)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::types::ProductId;

    fn rice() -> Product {
        Product::new(
            ProductId::from(1),
            "Basmati Rice",
            Decimal::from(120),
            Unit::Kilogram,
            "Grains",
        )
        .with_family_units()
    }

    #[test]
    fn test_canonical_unit_is_price_times_quantity() {
        let price = price_for(&rice(), Decimal::new(15, 1), Unit::Kilogram).unwrap();
        assert_eq!(price, Decimal::from(180));
    }

    #[test]
    fn test_500_gram_of_120_per_kg_is_60() {
        let price = price_for(&rice(), Decimal::from(500), Unit::Gram).unwrap();
        assert_eq!(price, Decimal::from(60));
    }

    #[test]
    fn test_unit_price_per_gram() {
        assert_eq!(unit_price(&rice(), Unit::Gram).unwrap(), Decimal::new(12, 2));
    }

    #[test]
    fn test_conversion_consistency_across_catalog() {
        // q canonical units cost the same as q * factor alternate units.
        let quantity = Decimal::new(25, 1);
        for product in default_catalog() {
            let table = product.unit.family().table();
            let canonical_factor = table.factor(product.unit).unwrap();
            let canonical = price_for(&product, quantity, product.unit).unwrap();

            for unit in &product.available_units {
                let scale = table.factor(*unit).unwrap() / canonical_factor;
                let converted = price_for(&product, quantity * scale, *unit).unwrap();
                assert_eq!(converted, canonical, "{} in {unit}", product.name);
            }
        }
    }

    #[test]
    fn test_unit_not_offered() {
        let product = rice().with_units(&[Unit::Kilogram]);
        let err = price_for(&product, Decimal::ONE, Unit::Gram).unwrap_err();
        assert_eq!(
            err,
            PricingError::UnitNotOffered {
                product: "Basmati Rice".to_string(),
                unit: Unit::Gram
            }
        );
    }

    #[test]
    fn test_cross_family_unit_rejected_even_if_listed() {
        let product = rice().with_units(&[Unit::Kilogram, Unit::Millilitre]);
        let err = price_for(&product, Decimal::ONE, Unit::Millilitre).unwrap_err();
        assert!(matches!(
            err,
            PricingError::Unit(UnitError::CrossFamily { .. })
        ));
    }

    #[test]
    fn test_zero_quantity_costs_nothing() {
        let price = price_for(&rice(), Decimal::ZERO, Unit::Gram).unwrap();
        assert!(price.is_zero());
    }
}
