//! Kirana Storefront library.
//!
//! The public ordering page: a filterable product grid, a session cart with
//! per-item unit conversion, and order hand-off to WhatsApp. The router is
//! built here so that it can be exercised in tests without a listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::http::{Request, Response};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{RateLimiterLayer, create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Directory of stylesheets and images served under `/static`.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the storefront application.
///
/// `order_limit` rate limits `POST /order`; it keys on proxy headers, so it
/// is left out when requests do not come through a proxy (as in tests).
pub fn app(state: AppState, order_limit: Option<RateLimiterLayer>) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .merge(routes::routes(order_limit))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: std::time::Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::config::StorefrontConfig;

    fn test_app() -> Router {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        app(AppState::new(config, StaticCatalog::default().into()), None)
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        test_app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_home_renders() {
        let request = Request::get("/").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stylesheet_is_served() {
        let request = Request::get("/static/css/main.css").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_order_requires_post() {
        let request = Request::get("/order").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let request = Request::get("/collections/all").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, StatusCode::NOT_FOUND);
    }
}
