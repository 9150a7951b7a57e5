//! Core types for Kirana.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod notification;
pub mod price;
pub mod quantity;
pub mod unit;

pub use id::*;
pub use notification::{Notification, NotificationVariant};
pub use price::{CurrencyCode, Price, format_amount};
pub use quantity::parse_quantity;
pub use unit::{ConversionTable, Unit, UnitError, UnitFamily};
