//! Cart route handlers.
//!
//! The product cards post here whenever a quantity or unit changes. The cart
//! lives in the session; after updating it the customer is sent back to the
//! grid they were looking at.

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use kirana_core::{CartError, Notification, PricingError, ProductId, Unit, parse_quantity};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::CatalogProvider;
use crate::error::Result;
use crate::models::session;
use crate::state::AppState;

/// Which control the customer changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineIntent {
    /// The quantity (and possibly the unit) was edited.
    #[default]
    Quantity,
    /// Only the unit selector moved.
    Unit,
}

/// Cart line form data.
#[derive(Debug, Deserialize)]
pub struct CartLineForm {
    pub product_id: String,
    #[serde(default)]
    pub quantity: String,
    pub unit: String,
    #[serde(default)]
    pub intent: LineIntent,
    /// Category the grid was filtered by, to return to it.
    pub category: Option<String>,
}

fn cart_error_notification(err: &CartError) -> Notification {
    match err {
        CartError::NegativeQuantity(_) => Notification::error(
            "Invalid quantity",
            "Quantity cannot be negative.",
        ),
        CartError::Pricing(PricingError::Overflow) => Notification::error(
            "Quantity too large",
            "That quantity is more than we can price. Please enter a smaller amount.",
        ),
        CartError::Pricing(e) => Notification::error("Unit not available", e.to_string()),
    }
}

/// Set a product's quantity and unit, or switch the unit of an existing line.
///
/// Blank or non-numeric quantities count as zero and remove the line. A unit
/// change on a product that is not in the cart is ignored.
#[instrument(skip(state, session))]
pub async fn set_line(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartLineForm>,
) -> Result<Redirect> {
    let back = super::back_to_grid(form.category.as_deref());

    let Ok(unit) = form.unit.parse::<Unit>() else {
        session::set_flash(
            &session,
            &Notification::error("Unit not available", format!("Unknown unit: {}", form.unit)),
        )
        .await;
        return Ok(Redirect::to(&back));
    };

    let products = state.catalog().list().await?;
    let product = form
        .product_id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| products.iter().find(|p| p.id == id));
    let Some(product) = product else {
        session::set_flash(
            &session,
            &Notification::error("Product not found", "That product is no longer available."),
        )
        .await;
        return Ok(Redirect::to(&back));
    };

    let mut cart = session::rehydrate(&session::load_cart(&session).await, &products);
    let result = match form.intent {
        LineIntent::Quantity => cart.set_line(product, parse_quantity(&form.quantity), unit),
        LineIntent::Unit => cart.change_unit(product, unit).map(|_| ()),
    };

    match result {
        Ok(()) => {
            tracing::debug!(product_id = %product.id, lines = cart.len(), "Cart updated");
            session::save_cart(&session, &cart).await?;
        }
        Err(e) => {
            tracing::info!(product_id = %product.id, error = %e, "Rejected cart update");
            session::set_flash(&session, &cart_error_notification(&e)).await;
        }
    }

    Ok(Redirect::to(&back))
}
