//! Integration tests for the Kirana store.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (routers driven with `tower::ServiceExt::oneshot`)
//! cargo test -p kirana-integration-tests
//!
//! # Tests against running servers
//! cargo run -p kirana-storefront &
//! cargo run -p kirana-admin &
//! cargo test -p kirana-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `admin_*` - Product table, catalog cache and admin pages
//! - `storefront_*` - Cart, order placement and hand-off
//! - `live_*` - HTTP checks against running binaries

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use kirana_admin::config::AdminConfig;
use kirana_admin::db::{MemoryProductTable, ProductStore};
use kirana_storefront::catalog::StaticCatalog;
use kirana_storefront::config::StorefrontConfig;
use tower::ServiceExt;

/// Storefront router with default configuration and the built-in catalog.
#[must_use]
pub fn storefront_app() -> Router {
    let config = StorefrontConfig::from_lookup(|_| None).unwrap();
    let state = kirana_storefront::state::AppState::new(config, StaticCatalog::default().into());
    kirana_storefront::app(state, None)
}

/// Admin router over the given in-process table.
#[must_use]
pub fn admin_app(table: MemoryProductTable) -> Router {
    let config = AdminConfig::from_lookup(|_| None).unwrap();
    let state = kirana_admin::state::AppState::new(config, ProductStore::from(table));
    kirana_admin::app(state)
}

/// A browser-like client for an in-process router: remembers the session
/// cookie between requests.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = Request::get(uri);
        self.send(request, Body::empty()).await
    }

    /// Post `application/x-www-form-urlencoded` fields.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let encoded: Vec<String> = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        let request = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(request, Body::from(encoded.join("&"))).await
    }

    async fn send(
        &mut self,
        mut request: axum::http::request::Builder,
        body: Body,
    ) -> Response<Body> {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let response = self
            .app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }
}

/// Read a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}
