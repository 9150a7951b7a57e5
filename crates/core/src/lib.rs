//! Kirana Core - Shared domain library.
//!
//! This crate provides the domain model used by every Kirana component:
//! - `storefront` - Public ordering page with cart and order hand-off
//! - `admin` - Product table management
//! - `cli` - Command-line tools for migrations, seeding and quotes
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Prices are computed with `rust_decimal` so that
//! converted unit prices and order totals are exact.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, units, quantities and notifications
//! - [`catalog`] - Products, the built-in catalog and category filtering
//! - [`pricing`] - Unit price conversion and line pricing
//! - [`cart`] - Ordered cart keyed by product
//! - [`order`] - Order validation, message rendering and hand-off

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod pricing;
pub mod types;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{CategoryFilter, Product, ProductError};
pub use order::{
    CustomerDetails, OrderChannel, OrderPolicy, OrderValidationError, PlacedOrder, place_order,
    render_order_message, validate_order,
};
pub use pricing::PricingError;
pub use types::*;
