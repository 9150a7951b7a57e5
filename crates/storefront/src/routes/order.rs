//! Order placement.
//!
//! A valid order is rendered into a chat message and the customer is
//! redirected to the WhatsApp link carrying it. That redirect is the whole
//! hand-off: the server never learns whether the message was sent.

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use kirana_core::{CustomerDetails, PlacedOrder, place_order};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::CatalogProvider;
use crate::error::{Result, add_breadcrumb};
use crate::models::session;
use crate::state::AppState;

/// Customer details form data.
#[derive(Deserialize)]
pub struct OrderForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

impl std::fmt::Debug for OrderForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderForm")
            .field("name", &"[REDACTED]")
            .field("address", &"[REDACTED]")
            .finish()
    }
}

/// Validate the order and redirect to the chat link.
///
/// On a validation failure the customer is returned to the ordering page with
/// a notification naming what is missing. Details already typed are kept.
#[instrument(skip(state, session))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OrderForm>,
) -> Result<Redirect> {
    let customer = CustomerDetails::new(form.name, form.address);
    session::save_customer(&session, &customer).await?;

    let products = state.catalog().list().await?;
    let cart = session::rehydrate(&session::load_cart(&session).await, &products);

    match place_order(
        &customer,
        &cart,
        state.policy(),
        state.currency(),
        state.channel(),
    ) {
        Ok(placed) => {
            let lines = cart.len().to_string();
            let data = [("lines", lines.as_str())];
            add_breadcrumb("order", "Order handed off", Some(&data[..]));
            tracing::info!(lines = cart.len(), total = %cart.total(), "Order handed off to WhatsApp");
            session::set_flash(&session, &PlacedOrder::notification()).await;
            Ok(Redirect::to(&placed.link))
        }
        Err(e) => {
            tracing::info!(reason = %e, "Order rejected");
            session::set_flash(&session, &e.notification()).await;
            Ok(Redirect::to("/"))
        }
    }
}
