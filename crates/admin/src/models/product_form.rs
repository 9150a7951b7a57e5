//! The add/edit product form.
//!
//! Only presence of the name and category is enforced. Numbers are read the
//! way a browser number field reports them: leading numeric text counts, and
//! anything blank, unparseable, negative or out of range becomes zero.

use kirana_core::{format_amount, parse_quantity};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use super::product::{AdminProduct, ProductFields};

/// Reasons a submitted form is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("product name is required")]
    MissingName,
    #[error("category is required")]
    MissingCategory,
}

/// Raw form values, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub stock_quantity: String,
    pub image_url: String,
}

impl ProductForm {
    /// Validate and coerce into writable fields.
    ///
    /// # Errors
    ///
    /// Returns `FormError` when the name or category is blank.
    pub fn into_fields(self) -> Result<ProductFields, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(FormError::MissingCategory);
        }

        Ok(ProductFields {
            name: name.to_string(),
            description: non_blank(&self.description),
            price: coerce_price(&self.price),
            category: category.to_string(),
            stock_quantity: coerce_stock(&self.stock_quantity),
            image_url: non_blank(&self.image_url),
        })
    }
}

impl From<&AdminProduct> for ProductForm {
    fn from(product: &AdminProduct) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: format_amount(product.price),
            category: product.category.clone(),
            stock_quantity: product.stock_quantity.to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Price in currency units, rounded to paise.
fn coerce_price(input: &str) -> Decimal {
    let price = parse_quantity(input);
    if price.is_sign_negative() {
        return Decimal::ZERO;
    }
    price.round_dp(2)
}

/// Whole units in stock.
fn coerce_stock(input: &str) -> i32 {
    let trimmed = input.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|&(idx, ch)| !(ch.is_ascii_digit() || (idx == 0 && matches!(ch, '+' | '-'))))
        .map_or(trimmed.len(), |(idx, _)| idx);

    trimmed
        .get(..digits_end)
        .and_then(|prefix| prefix.parse::<i32>().ok())
        .filter(|stock| *stock >= 0)
        .unwrap_or(0)
}
