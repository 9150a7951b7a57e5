//! The customer's in-progress order.
//!
//! Lines keep insertion order and there is at most one line per product. A
//! line's unit price is computed (and the unit validated) when the line is
//! set, and a line is only accepted when the cart total still fits in a
//! `Decimal`, so totals never fail afterwards.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::catalog::Product;
use crate::pricing::{self, PricingError};
use crate::types::{ProductId, Unit};

/// Errors raised when editing the cart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("quantity cannot be negative: {0}")]
    NegativeQuantity(Decimal),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// One product's chosen quantity and unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: Decimal,
    pub unit: Unit,
    unit_price: Decimal,
    line_total: Decimal,
}

impl CartLine {
    fn priced(product: &Product, quantity: Decimal, unit: Unit) -> Result<Self, CartError> {
        let unit_price = pricing::unit_price(product, unit)?;
        let line_total = unit_price
            .checked_mul(quantity)
            .ok_or(PricingError::Overflow)?;
        Ok(Self {
            product: product.clone(),
            quantity,
            unit,
            unit_price,
            line_total,
        })
    }

    /// Price of one `unit` of the product.
    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.line_total
    }
}

/// Ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    index: HashMap<ProductId, usize>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity and unit for a product.
    ///
    /// Zero removes the product's line. Setting a product already in the cart
    /// replaces its line in place, so repeating the call changes nothing.
    ///
    /// # Errors
    ///
    /// Rejects negative quantities, units the product cannot be priced in and
    /// lines that would overflow the cart total. The cart is unchanged on
    /// error.
    pub fn set_line(
        &mut self,
        product: &Product,
        quantity: Decimal,
        unit: Unit,
    ) -> Result<(), CartError> {
        if quantity.is_sign_negative() && !quantity.is_zero() {
            return Err(CartError::NegativeQuantity(quantity));
        }
        if quantity.is_zero() {
            self.remove(&product.id);
            return Ok(());
        }

        let line = CartLine::priced(product, quantity, unit)?;
        self.total_with(&line)?;
        match self.index.get(&product.id).copied() {
            Some(position) => {
                if let Some(slot) = self.lines.get_mut(position) {
                    *slot = line;
                }
            }
            None => {
                self.index.insert(product.id.clone(), self.lines.len());
                self.lines.push(line);
            }
        }
        Ok(())
    }

    /// Switch the unit of an existing line, keeping its quantity.
    ///
    /// Returns `false` without touching the cart when the product has no line.
    ///
    /// # Errors
    ///
    /// Rejects units the product cannot be priced in.
    pub fn change_unit(&mut self, product: &Product, unit: Unit) -> Result<bool, CartError> {
        let quantity = self.quantity_of(&product.id);
        if quantity.is_zero() {
            return Ok(false);
        }
        self.set_line(product, quantity, unit)?;
        Ok(true)
    }

    /// Drop a product's line, if any.
    pub fn remove(&mut self, id: &ProductId) {
        let Some(position) = self.index.remove(id) else {
            return;
        };
        self.lines.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
    }

    /// Quantity in the cart, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> Decimal {
        self.line(id).map_or(Decimal::ZERO, |line| line.quantity)
    }

    /// Selected unit, falling back to the product's canonical unit.
    #[must_use]
    pub fn unit_of(&self, product: &Product) -> Unit {
        self.line(&product.id).map_or(product.unit, |line| line.unit)
    }

    /// Line total, zero when absent.
    #[must_use]
    pub fn line_total(&self, id: &ProductId) -> Decimal {
        self.line(id).map_or(Decimal::ZERO, CartLine::total)
    }

    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.index.get(id).and_then(|&position| self.lines.get(position))
    }

    /// Sum of all line totals.
    ///
    /// Line totals are non-negative and every accepted line was checked
    /// against the running sum, so this cannot overflow.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.total()))
    }

    /// Cart total with `line` in place of the product's current line.
    fn total_with(&self, line: &CartLine) -> Result<Decimal, PricingError> {
        self.lines
            .iter()
            .filter(|existing| existing.product.id != line.product.id)
            .map(CartLine::total)
            .try_fold(line.total(), Decimal::checked_add)
            .ok_or(PricingError::Overflow)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    fn product(name: &str) -> Product {
        default_catalog()
            .into_iter()
            .find(|p| p.name == name)
            .unwrap()
    }

    #[test]
    fn test_set_then_clear_restores_size() {
        let mut cart = Cart::new();
        cart.set_line(&product("Milk"), Decimal::ONE, Unit::Litre)
            .unwrap();
        let before = cart.len();

        let rice = product("Basmati Rice");
        cart.set_line(&rice, Decimal::from(2), Unit::Kilogram).unwrap();
        assert_eq!(cart.len(), before + 1);

        cart.set_line(&rice, Decimal::ZERO, Unit::Kilogram).unwrap();
        assert_eq!(cart.len(), before);
    }

    #[test]
    fn test_set_line_is_idempotent() {
        let rice = product("Basmati Rice");
        let mut once = Cart::new();
        once.set_line(&rice, Decimal::from(500), Unit::Gram).unwrap();
        let mut twice = once.clone();
        twice.set_line(&rice, Decimal::from(500), Unit::Gram).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut cart = Cart::new();
        let rice = product("Basmati Rice");
        let milk = product("Milk");
        cart.set_line(&rice, Decimal::ONE, Unit::Kilogram).unwrap();
        cart.set_line(&milk, Decimal::ONE, Unit::Litre).unwrap();
        cart.set_line(&rice, Decimal::from(3), Unit::Kilogram).unwrap();

        let names: Vec<_> = cart.lines().iter().map(|l| l.product.name.as_str()).collect();
        assert_eq!(names, vec!["Basmati Rice", "Milk"]);
        assert_eq!(cart.quantity_of(&rice.id), Decimal::from(3));
    }

    #[test]
    fn test_remove_reindexes_later_lines() {
        let mut cart = Cart::new();
        let rice = product("Basmati Rice");
        let milk = product("Milk");
        let eggs = product("Eggs");
        cart.set_line(&rice, Decimal::ONE, Unit::Kilogram).unwrap();
        cart.set_line(&milk, Decimal::ONE, Unit::Litre).unwrap();
        cart.set_line(&eggs, Decimal::from(6), Unit::Piece).unwrap();

        cart.remove(&rice.id);
        assert_eq!(cart.line(&eggs.id).unwrap().product.name, "Eggs");
        assert_eq!(cart.line(&milk.id).unwrap().product.name, "Milk");
        assert!(cart.line(&rice.id).is_none());
    }

    #[test]
    fn test_total_is_additive() {
        let mut cart = Cart::new();
        cart.set_line(&product("Milk"), Decimal::new(5, 1), Unit::Litre)
            .unwrap();
        let before = cart.total();

        let rice = product("Basmati Rice");
        cart.set_line(&rice, Decimal::from(500), Unit::Gram).unwrap();
        let expected = pricing::price_for(&rice, Decimal::from(500), Unit::Gram).unwrap();
        assert_eq!(cart.total(), before + expected);
        assert_eq!(cart.total(), Decimal::from(85));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut cart = Cart::new();
        let err = cart
            .set_line(&product("Onions"), Decimal::from(-1), Unit::Kilogram)
            .unwrap_err();
        assert_eq!(err, CartError::NegativeQuantity(Decimal::from(-1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_invalid_unit_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let bread = product("Bread");
        cart.set_line(&bread, Decimal::from(2), Unit::Loaf).unwrap();
        let err = cart
            .set_line(&bread, Decimal::from(2), Unit::Piece)
            .unwrap_err();
        assert!(matches!(err, CartError::Pricing(_)));
        assert_eq!(cart.unit_of(&bread), Unit::Loaf);
    }

    #[test]
    fn test_change_unit_without_quantity_is_inert() {
        let mut cart = Cart::new();
        let rice = product("Basmati Rice");
        assert!(!cart.change_unit(&rice, Unit::Gram).unwrap());
        assert!(cart.is_empty());
        assert_eq!(cart.unit_of(&rice), Unit::Kilogram);
    }

    #[test]
    fn test_change_unit_reprices_line() {
        let mut cart = Cart::new();
        let rice = product("Basmati Rice");
        cart.set_line(&rice, Decimal::from(2), Unit::Kilogram).unwrap();
        assert!(cart.change_unit(&rice, Unit::Gram).unwrap());

        let line = cart.line(&rice.id).unwrap();
        assert_eq!(line.unit, Unit::Gram);
        assert_eq!(line.quantity, Decimal::from(2));
        assert_eq!(line.total(), Decimal::new(24, 2));
    }

    #[test]
    fn test_line_overflowing_total_rejected() {
        let huge = crate::parse_quantity("600000000000000000000000000");
        let mut cart = Cart::new();
        cart.set_line(&product("Basmati Rice"), huge, Unit::Kilogram)
            .unwrap();
        let before = cart.total();

        let err = cart
            .set_line(&product("Sugar"), huge, Unit::Kilogram)
            .unwrap_err();
        assert_eq!(err, CartError::Pricing(PricingError::Overflow));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), before);
    }

    #[test]
    fn test_replacing_large_line_checks_new_total() {
        let huge = crate::parse_quantity("600000000000000000000000000");
        let rice = product("Basmati Rice");
        let mut cart = Cart::new();
        cart.set_line(&rice, huge, Unit::Kilogram).unwrap();

        // Replacing a line does not count its old total
        cart.set_line(&rice, huge, Unit::Kilogram).unwrap();
        cart.set_line(&product("Salt"), Decimal::ONE, Unit::Kilogram)
            .unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Decimal::from(120) * huge + Decimal::from(18));
    }
}
