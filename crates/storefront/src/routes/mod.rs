//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Ordering page (?category= filters the grid)
//! POST /cart/line        - Set a product's quantity, or switch its unit
//! POST /order            - Validate and hand the order off to WhatsApp
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (database for the remote catalog)
//! ```

pub mod cart;
pub mod health;
pub mod home;
pub mod order;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::RateLimiterLayer;
use crate::state::AppState;

/// Create the order routes router, optionally rate limited.
pub fn order_routes(limit: Option<RateLimiterLayer>) -> Router<AppState> {
    let router = Router::new().route("/order", post(order::place));
    match limit {
        Some(layer) => router.layer(layer),
        None => router,
    }
}

/// Create all routes for the storefront.
pub fn routes(order_limit: Option<RateLimiterLayer>) -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/cart/line", post(cart::set_line))
        .merge(order_routes(order_limit))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Where to send the customer after a form post: back to the grid they were
/// looking at.
#[must_use]
pub fn back_to_grid(category: Option<&str>) -> String {
    match category.map(str::trim) {
        None | Some("" | kirana_core::catalog::ALL_CATEGORIES) => "/".to_string(),
        Some(name) => format!("/?category={}", urlencoding::encode(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_to_grid() {
        assert_eq!(back_to_grid(None), "/");
        assert_eq!(back_to_grid(Some("All")), "/");
        assert_eq!(back_to_grid(Some("Dairy")), "/?category=Dairy");
        assert_eq!(back_to_grid(Some("Fruit & Veg")), "/?category=Fruit%20%26%20Veg");
    }
}
