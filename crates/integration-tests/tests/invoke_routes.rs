//! Routing, props decoding and batching through the `/live` endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use commerce_apps_integration_tests::TestApp;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request(Method::GET, "/health", &[], None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_meta_lists_apps_and_manifests() {
    let app = TestApp::new();
    let response = app.request(Method::GET, "/live/_meta", &[], None).await;

    assert_eq!(response.status, StatusCode::OK);
    let installed = response.body["installedApps"].as_array().unwrap();
    assert_eq!(installed[0]["name"], "deco-sites/admin");
    let manifests: Vec<_> = response.body["manifests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(manifests, vec!["shopify", "vtex", "wake"]);
}

#[tokio::test]
async fn test_unknown_key_is_not_found() {
    let app = TestApp::new();
    let response = app.invoke("wake/loaders/nope.ts", json!({}), &[]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_props_are_rejected_before_any_call() {
    let app = TestApp::new();
    let mock = app.server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let response = app
        .invoke("wake/loaders/productListingPage.ts", json!({"first": "many"}), &[])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    mock.assert_hits(0);
}

#[tokio::test]
async fn test_unconfigured_app_is_unavailable() {
    let app = TestApp::with_config(|config| config.vtex = None);
    let response = app
        .invoke("vtex/loaders/legacy/productList.ts", json!({}), &[])
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_vendor_failure_is_bad_gateway() {
    let app = TestApp::new();
    app.server.mock(|when, then| {
        when.method(GET).path("/wake/produtos");
        then.status(500).body("boom");
    });

    let response = app.invoke("wake/loaders/productList.ts", json!({}), &[]).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_batch_returns_outputs_by_name() {
    let app = TestApp::new();
    let mock = app.server.mock(|when, then| {
        when.method(POST)
            .path("/wake/graphql")
            .body_contains("checkoutAddCoupon");
        then.status(200).json_body(json!({
            "data": {"checkout": {"checkoutId": "c-1", "coupon": "PROMO10"}}
        }));
    });

    let response = app
        .request(
            Method::POST,
            "/live/invoke",
            &[("cookie", "carrinho-id=c-1")],
            Some(json!({
                "first": {"key": "wake/actions/cart/addCoupon.ts", "props": {"coupon": "PROMO10"}},
                "second": {"key": "wake/actions/cart/addCoupon.ts", "props": {"coupon": "PROMO10"}}
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["first"]["checkoutId"], "c-1");
    assert_eq!(response.body["second"]["checkoutId"], "c-1");
    assert_eq!(response.set_cookies().len(), 2);
    mock.assert_hits(2);
}

#[tokio::test]
async fn test_batch_fails_with_any_entry() {
    let app = TestApp::new();
    let response = app
        .request(
            Method::POST,
            "/live/invoke",
            &[],
            Some(json!({
                "ok": {"key": "wake/loaders/nope.ts"},
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(Method::POST, "/live/invoke", &[], Some(json!(["not", "a", "map"])))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
