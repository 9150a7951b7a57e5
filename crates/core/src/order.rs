//! Order validation and the hand-off message.
//!
//! An order is the customer's details plus a non-empty cart. Once validated it
//! is rendered into a plain-text chat message and handed to an
//! [`OrderChannel`], which turns the message into a link the customer follows.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::{CurrencyCode, Notification, format_amount};

/// Who the order is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

impl CustomerDetails {
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Which customer fields the store requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPolicy {
    pub require_address: bool,
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self {
            require_address: true,
        }
    }
}

/// Reasons an order cannot be placed. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    #[error("customer name is required")]
    MissingName,
    #[error("delivery address is required")]
    MissingAddress,
    #[error("the cart is empty")]
    EmptyCart,
}

impl OrderValidationError {
    /// The notification shown to the customer.
    #[must_use]
    pub fn notification(&self) -> Notification {
        let (title, description) = match self {
            Self::MissingName => (
                "Please enter your name",
                "We need your name to process the order.",
            ),
            Self::MissingAddress => (
                "Please enter your address",
                "We need your delivery address to process the order.",
            ),
            Self::EmptyCart => ("No items selected", "Please add some items to your order."),
        };
        Notification::error(title, description)
    }
}

/// Check that an order may be placed.
///
/// # Errors
///
/// Returns the first missing piece: name, then address (when the policy
/// asks for one), then cart contents.
pub fn validate_order(
    customer: &CustomerDetails,
    cart: &Cart,
    policy: OrderPolicy,
) -> Result<(), OrderValidationError> {
    if customer.name.trim().is_empty() {
        return Err(OrderValidationError::MissingName);
    }
    if policy.require_address && customer.address.trim().is_empty() {
        return Err(OrderValidationError::MissingAddress);
    }
    if cart.is_empty() {
        return Err(OrderValidationError::EmptyCart);
    }
    Ok(())
}

/// Render the chat message for an order.
///
/// Pure and deterministic: lines appear in cart order and the same inputs
/// always yield the same bytes. The address block is only included when the
/// policy takes an address.
#[must_use]
pub fn render_order_message(
    customer: &CustomerDetails,
    cart: &Cart,
    currency: CurrencyCode,
    policy: OrderPolicy,
) -> String {
    let symbol = currency.symbol();
    let mut message = format!("\u{1f6d2} *New Order from {}*\n\n", customer.name);

    let lines: Vec<String> = cart
        .lines()
        .iter()
        .map(|line| {
            format!(
                "\u{2022} {} - {} {} @ {symbol}{}/{} = {symbol}{}",
                line.product.name,
                line.quantity.normalize(),
                line.unit,
                format_amount(line.unit_price()),
                line.unit,
                format_amount(line.total()),
            )
        })
        .collect();
    message.push_str(&lines.join("\n"));

    let _ = write!(
        message,
        "\n\n*Total Amount: {symbol}{}*\n\n",
        format_amount(cart.total())
    );

    if policy.require_address {
        let _ = write!(
            message,
            "\u{1f4cd} *Delivery Address:*\n{}\n\n",
            customer.address
        );
    }

    let _ = write!(
        message,
        "Please confirm the order and let me know the delivery time.\n\nCustomer: {}",
        customer.name
    );
    message
}

/// Destination an order message is handed off to.
pub trait OrderChannel {
    /// Link that delivers `message` when followed.
    fn link_for(&self, message: &str) -> String;
}

/// A validated, rendered order ready to hand off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub message: String,
    pub link: String,
}

impl PlacedOrder {
    /// Notification confirming the hand-off.
    #[must_use]
    pub fn notification() -> Notification {
        Notification::success(
            "Order placed successfully!",
            "You will be redirected to WhatsApp to confirm your order.",
        )
    }
}

/// Validate, render and address an order.
///
/// The channel is only consulted once validation has passed.
///
/// # Errors
///
/// See [`validate_order`].
pub fn place_order<C: OrderChannel + ?Sized>(
    customer: &CustomerDetails,
    cart: &Cart,
    policy: OrderPolicy,
    currency: CurrencyCode,
    channel: &C,
) -> Result<PlacedOrder, OrderValidationError> {
    validate_order(customer, cart, policy)?;
    let message = render_order_message(customer, cart, currency, policy);
    let link = channel.link_for(&message);
    Ok(PlacedOrder { message, link })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::default_catalog;
    use crate::types::Unit;

    struct CountingChannel {
        calls: Cell<usize>,
    }

    impl OrderChannel for CountingChannel {
        fn link_for(&self, message: &str) -> String {
            self.calls.set(self.calls.get() + 1);
            format!("chat:{}", message.len())
        }
    }

    fn channel() -> CountingChannel {
        CountingChannel {
            calls: Cell::new(0),
        }
    }

    fn sample_cart() -> Cart {
        let catalog = default_catalog();
        let mut cart = Cart::new();
        cart.set_line(&catalog[0], Decimal::from(500), Unit::Gram)
            .unwrap();
        cart.set_line(&catalog[7], Decimal::new(15, 1), Unit::Litre)
            .unwrap();
        cart
    }

    fn ravi() -> CustomerDetails {
        CustomerDetails::new("Ravi", "12 MG Road")
    }

    #[test]
    fn test_message_format() {
        let message = render_order_message(
            &ravi(),
            &sample_cart(),
            CurrencyCode::INR,
            OrderPolicy::default(),
        );
        let expected = "\u{1f6d2} *New Order from Ravi*\n\n\
            \u{2022} Basmati Rice - 500 gram @ \u{20b9}0.12/gram = \u{20b9}60.00\n\
            \u{2022} Milk - 1.5 L @ \u{20b9}50.00/L = \u{20b9}75.00\n\n\
            *Total Amount: \u{20b9}135.00*\n\n\
            \u{1f4cd} *Delivery Address:*\n12 MG Road\n\n\
            Please confirm the order and let me know the delivery time.\n\n\
            Customer: Ravi";
        assert_eq!(message, expected);
    }

    #[test]
    fn test_message_without_address_block() {
        let policy = OrderPolicy {
            require_address: false,
        };
        let message = render_order_message(&ravi(), &sample_cart(), CurrencyCode::INR, policy);
        assert!(!message.contains("Delivery Address"));
        assert!(message.contains("*Total Amount: \u{20b9}135.00*\n\nPlease confirm"));
    }

    #[test]
    fn test_message_is_deterministic() {
        let cart = sample_cart();
        let first = render_order_message(&ravi(), &cart, CurrencyCode::INR, OrderPolicy::default());
        let second = render_order_message(&ravi(), &cart, CurrencyCode::INR, OrderPolicy::default());
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_empty_name_blocks_dispatch() {
        let channel = channel();
        let customer = CustomerDetails::new("   ", "12 MG Road");
        let err = place_order(
            &customer,
            &sample_cart(),
            OrderPolicy::default(),
            CurrencyCode::INR,
            &channel,
        )
        .unwrap_err();
        assert_eq!(err, OrderValidationError::MissingName);
        assert_eq!(err.notification().title, "Please enter your name");
        assert_eq!(channel.calls.get(), 0);
    }

    #[test]
    fn test_missing_address_only_when_required() {
        let customer = CustomerDetails::new("Ravi", "");
        let cart = sample_cart();
        assert_eq!(
            validate_order(&customer, &cart, OrderPolicy::default()),
            Err(OrderValidationError::MissingAddress)
        );
        assert_eq!(
            validate_order(
                &customer,
                &cart,
                OrderPolicy {
                    require_address: false
                }
            ),
            Ok(())
        );
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = validate_order(&ravi(), &Cart::new(), OrderPolicy::default()).unwrap_err();
        assert_eq!(err, OrderValidationError::EmptyCart);
        assert!(err.notification().is_destructive());
    }

    #[test]
    fn test_place_order_consults_channel_once() {
        let channel = channel();
        let placed = place_order(
            &ravi(),
            &sample_cart(),
            OrderPolicy::default(),
            CurrencyCode::INR,
            &channel,
        )
        .unwrap();
        assert_eq!(channel.calls.get(), 1);
        assert_eq!(placed.link, format!("chat:{}", placed.message.len()));
    }
}
