//! Price quotes against the built-in catalog.

use kirana_core::catalog::default_catalog;
use kirana_core::pricing::price_for;
use kirana_core::{CurrencyCode, Price, PricingError, ProductId, Unit, UnitError};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("no built-in product with id {0}")]
    UnknownProduct(String),
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error(transparent)]
    Unit(#[from] UnitError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Price `quantity` of a built-in product, e.g. "750 gram Basmati Rice = ₹90.00".
pub fn quote(product_id: &str, quantity: &str, unit: Option<&str>) -> Result<String, QuoteError> {
    let id: ProductId = product_id
        .parse()
        .map_err(|_| QuoteError::UnknownProduct(product_id.to_string()))?;
    let catalog = default_catalog();
    let product = catalog
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| QuoteError::UnknownProduct(product_id.to_string()))?;

    let quantity: Decimal = quantity
        .trim()
        .parse()
        .map_err(|_| QuoteError::InvalidQuantity(quantity.to_string()))?;
    if quantity.is_sign_negative() {
        return Err(QuoteError::InvalidQuantity(quantity.to_string()));
    }
    let unit = match unit {
        Some(unit) => unit.parse::<Unit>()?,
        None => product.unit,
    };

    let amount = price_for(product, quantity, unit)?;
    Ok(format!(
        "{} {} {} = {}",
        quantity.normalize(),
        unit,
        product.name,
        Price::new(amount, CurrencyCode::INR)
    ))
}
