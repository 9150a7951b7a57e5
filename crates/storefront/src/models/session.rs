//! Session-stored ordering state.
//!
//! The cart is stored as plain `(product id, quantity, unit)` triples rather
//! than priced lines, and rebuilt against the current catalog on every
//! request. Prices therefore always reflect the catalog being shown.

use kirana_core::{Cart, CustomerDetails, Notification, Product, ProductId, Unit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;

/// Session keys for ordering data.
pub mod keys {
    /// Key for the stored cart lines.
    pub const CART: &str = "cart";

    /// Key for the customer's name and address.
    pub const CUSTOMER: &str = "customer";

    /// Key for the notification shown on the next page render.
    pub const FLASH: &str = "flash";
}

/// One cart line as persisted in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCartLine {
    pub product_id: ProductId,
    pub quantity: Decimal,
    pub unit: Unit,
}

/// Rebuild a cart from stored lines.
///
/// Lines whose product is no longer listed, or whose unit the product no
/// longer offers, are dropped.
#[must_use]
pub fn rehydrate(stored: &[StoredCartLine], products: &[Product]) -> Cart {
    let mut cart = Cart::new();
    for line in stored {
        let Some(product) = products.iter().find(|p| p.id == line.product_id) else {
            continue;
        };
        if let Err(e) = cart.set_line(product, line.quantity, line.unit) {
            warn!(product_id = %line.product_id, error = %e, "Dropping stored cart line");
        }
    }
    cart
}

/// Flatten a cart into storable lines.
#[must_use]
pub fn dehydrate(cart: &Cart) -> Vec<StoredCartLine> {
    cart.lines()
        .iter()
        .map(|line| StoredCartLine {
            product_id: line.product.id.clone(),
            quantity: line.quantity,
            unit: line.unit,
        })
        .collect()
}

/// Read the stored cart lines.
pub async fn load_cart(session: &Session) -> Vec<StoredCartLine> {
    session
        .get::<Vec<StoredCartLine>>(keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the cart.
///
/// # Errors
///
/// Returns the session store error.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, dehydrate(cart)).await
}

/// Read the customer's details, empty when never entered.
pub async fn load_customer(session: &Session) -> CustomerDetails {
    session
        .get::<CustomerDetails>(keys::CUSTOMER)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the customer's details.
///
/// # Errors
///
/// Returns the session store error.
pub async fn save_customer(
    session: &Session,
    customer: &CustomerDetails,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CUSTOMER, customer).await
}

/// Queue a notification for the next render.
pub async fn set_flash(session: &Session, notification: &Notification) {
    if let Err(e) = session.insert(keys::FLASH, notification).await {
        warn!(error = %e, "Failed to store flash notification");
    }
}

/// Take the queued notification, if any.
pub async fn take_flash(session: &Session) -> Option<Notification> {
    session.remove::<Notification>(keys::FLASH).await.ok().flatten()
}
