//! Ordering page route handler.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use kirana_core::catalog::{categories, filter_products};
use kirana_core::{
    Cart, CategoryFilter, CurrencyCode, CustomerDetails, Notification, Price, Product,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::CatalogProvider;
use crate::config::StoreInfo;
use crate::models::session;
use crate::state::AppState;

/// Build-time hash of `static/css/main.css`.
pub const CSS_HASH: &str = env!("CSS_HASH");

/// Query parameters of the ordering page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub category: Option<String>,
}

/// A category badge in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// An option in a product's unit selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOption {
    pub value: String,
    pub selected: bool,
}

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Canonical price, e.g. "₹120.00/kg".
    pub price: String,
    pub rating: Option<String>,
    pub in_stock: bool,
    /// Quantity in the cart, blank when none.
    pub quantity: String,
    pub units: Vec<UnitOption>,
    /// Line total, only when the product is in the cart.
    pub line_total: Option<String>,
}

/// Order summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub line_total: String,
}

/// Ordering page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub store: StoreInfo,
    pub customer: CustomerDetails,
    pub require_address: bool,
    pub categories: Vec<CategoryView>,
    pub selected_category: String,
    pub products: Vec<ProductView>,
    pub summary: Vec<SummaryLine>,
    pub total: String,
    pub flash: Option<Notification>,
    pub css_hash: &'static str,
}

fn money(currency: CurrencyCode, amount: rust_decimal::Decimal) -> String {
    Price::new(amount, currency).display()
}

/// Card data for each product matching the filter.
#[must_use]
pub fn product_views(
    products: &[Product],
    filter: &CategoryFilter,
    cart: &Cart,
    currency: CurrencyCode,
) -> Vec<ProductView> {
    filter_products(products, filter)
        .into_iter()
        .map(|product| {
            let selected = cart.unit_of(product);
            let line = cart.line(&product.id);
            ProductView {
                id: product.id.to_string(),
                name: product.name.clone(),
                category: product.category.clone(),
                price: format!("{}/{}", money(currency, product.price), product.unit),
                rating: product.rating.map(|r| format!("{r:.1}")),
                in_stock: product.in_stock,
                quantity: line.map(|l| l.quantity.normalize().to_string()).unwrap_or_default(),
                units: product
                    .available_units
                    .iter()
                    .map(|unit| UnitOption {
                        value: unit.to_string(),
                        selected: *unit == selected,
                    })
                    .collect(),
                line_total: line.map(|l| money(currency, l.total())),
            }
        })
        .collect()
}

/// Summary rows in cart order.
#[must_use]
pub fn summary_lines(cart: &Cart, currency: CurrencyCode) -> Vec<SummaryLine> {
    cart.lines()
        .iter()
        .map(|line| SummaryLine {
            name: line.product.name.clone(),
            quantity: line.quantity.normalize().to_string(),
            unit: line.unit.to_string(),
            line_total: money(currency, line.total()),
        })
        .collect()
}

/// Filter bar badges.
#[must_use]
pub fn category_views(products: &[Product], filter: &CategoryFilter) -> Vec<CategoryView> {
    categories(products)
        .into_iter()
        .map(|label| CategoryView {
            href: super::back_to_grid(Some(&label)),
            active: label == filter.label(),
            label,
        })
        .collect()
}

/// Display the ordering page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<IndexQuery>,
) -> impl IntoResponse {
    let filter = CategoryFilter::from_query(query.category.as_deref());
    let mut flash = session::take_flash(&session).await;

    let products = match state.catalog().list().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!("Failed to list products: {e}");
            flash = Some(Notification::error(
                "Error fetching products",
                "Could not load products. Please try again shortly.",
            ));
            Arc::from(Vec::<Product>::new())
        }
    };

    let cart = session::rehydrate(&session::load_cart(&session).await, &products);
    let currency = state.currency();

    IndexTemplate {
        store: state.store().clone(),
        customer: session::load_customer(&session).await,
        require_address: state.policy().require_address,
        categories: category_views(&products, &filter),
        selected_category: filter.label().to_string(),
        products: product_views(&products, &filter, &cart, currency),
        summary: summary_lines(&cart, currency),
        total: money(currency, cart.total()),
        flash,
        css_hash: CSS_HASH,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kirana_core::Unit;
    use kirana_core::catalog::default_catalog;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_product_views_reflect_cart() {
        let catalog = default_catalog();
        let mut cart = Cart::new();
        cart.set_line(&catalog[0], Decimal::from(500), Unit::Gram)
            .unwrap();

        let views = product_views(&catalog, &CategoryFilter::All, &cart, CurrencyCode::INR);
        let rice = &views[0];
        assert_eq!(rice.price, "\u{20b9}120.00/kg");
        assert_eq!(rice.quantity, "500");
        assert_eq!(rice.line_total.as_deref(), Some("\u{20b9}60.00"));
        assert!(rice.units.iter().any(|u| u.value == "gram" && u.selected));
        assert_eq!(rice.rating.as_deref(), Some("4.5"));

        let flour = &views[1];
        assert_eq!(flour.quantity, "");
        assert!(flour.line_total.is_none());
        assert!(flour.units.iter().any(|u| u.value == "kg" && u.selected));
    }

    #[test]
    fn test_product_views_filter_by_category() {
        let catalog = default_catalog();
        let filter = CategoryFilter::Named("Vegetables".to_string());
        let views = product_views(&catalog, &filter, &Cart::new(), CurrencyCode::INR);
        let names: Vec<_> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Onions", "Potatoes", "Tomatoes"]);
    }

    #[test]
    fn test_category_views_mark_active() {
        let catalog = default_catalog();
        let views = category_views(&catalog, &CategoryFilter::Named("Oils".to_string()));
        let active: Vec<_> = views.iter().filter(|c| c.active).map(|c| c.label.as_str()).collect();
        assert_eq!(active, vec!["Oils"]);
        assert_eq!(views[0].href, "/");
    }

    #[test]
    fn test_summary_lines() {
        let catalog = default_catalog();
        let mut cart = Cart::new();
        cart.set_line(&catalog[7], Decimal::new(15, 1), Unit::Litre)
            .unwrap();
        let lines = summary_lines(&cart, CurrencyCode::INR);
        assert_eq!(
            lines,
            vec![SummaryLine {
                name: "Milk".to_string(),
                quantity: "1.5".to_string(),
                unit: "L".to_string(),
                line_total: "\u{20b9}75.00".to_string(),
            }]
        );
    }
}
