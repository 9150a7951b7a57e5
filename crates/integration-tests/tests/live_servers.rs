//! HTTP checks against running binaries.
//!
//! ```bash
//! cargo run -p kirana-storefront &
//! cargo run -p kirana-admin &
//! cargo test -p kirana-integration-tests --test live_servers -- --ignored
//! ```

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use reqwest::redirect::Policy;

fn base_url(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_live_storefront_order_handoff() {
    let base = base_url("STOREFRONT_BASE_URL", "http://localhost:3000");
    let client = client();

    let health = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let added = client
        .post(format!("{base}/cart/line"))
        .form(&[("product_id", "8"), ("quantity", "2"), ("unit", "L")])
        .send()
        .await
        .unwrap();
    assert_eq!(added.status(), StatusCode::SEE_OTHER);

    let order = client
        .post(format!("{base}/order"))
        .form(&[("name", "Asha"), ("address", "12 MG Road")])
        .send()
        .await
        .unwrap();
    assert_eq!(order.status(), StatusCode::SEE_OTHER);
    let location = order.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("https://wa.me/"));
}

#[tokio::test]
#[ignore = "requires a running admin panel"]
async fn test_live_admin_lists_products() {
    let base = base_url("ADMIN_BASE_URL", "http://localhost:3001");
    let client = client();

    let ready = client.get(format!("{base}/health/ready")).send().await.unwrap();
    assert_eq!(ready.status(), StatusCode::OK);

    let page = client
        .get(format!("{base}/products"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Products ("));
}
