//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check (products table)
//!
//! GET  /                               - Redirects to /products
//! GET  /products                       - Product listing
//! GET  /products/new                   - Add product form
//! POST /products                       - Create product
//! GET  /products/{id}/edit             - Edit product form
//! POST /products/{id}                  - Update product
//! GET  /products/{id}/delete           - Delete confirmation
//! POST /products/{id}/delete           - Delete confirmed product
//! POST /products/{id}/delete/cancel    - Cancel pending delete
//! ```

pub mod health;
pub mod products;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/products", get(products::index).post(products::create))
        .route("/products/new", get(products::new_form))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/edit", get(products::edit_form))
        .route(
            "/products/{id}/delete",
            get(products::confirm_delete).post(products::delete),
        )
        .route("/products/{id}/delete/cancel", post(products::cancel_delete))
}
