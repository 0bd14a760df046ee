//! Cart actions: the cart cookie gates every mutation and is re-written from
//! the vendor's answer.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use commerce_apps_integration_tests::TestApp;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_wake_add_item_without_cookie_makes_no_call() {
    let app = TestApp::new();
    let mock = app.server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let response = app
        .invoke(
            "wake/actions/cart/addItem.ts",
            json!({"productVariantId": 42, "quantity": 1}),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.set_cookies().is_empty());
    mock.assert_hits(0);
}

#[tokio::test]
async fn test_wake_add_item_sets_cart_cookie() {
    let app = TestApp::new();
    let mock = app.server.mock(|when, then| {
        when.method(POST)
            .path("/wake/graphql")
            .header("tcs-access-token", "wake-token")
            .body_contains("checkoutAddProduct")
            .body_contains(r#""id":"c-1""#);
        then.status(200).json_body(json!({
            "data": {"checkout": {"checkoutId": "c-2", "products": []}}
        }));
    });

    let response = app
        .invoke(
            "wake/actions/cart/addItem.ts",
            json!({"productVariantId": 42, "quantity": 2}),
            &[("cookie", "carrinho-id=c-1")],
        )
        .await;

    mock.assert();
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["checkoutId"], "c-2");
    let cookies = response.set_cookies();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("carrinho-id=c-2"));
    assert!(cookies[0].contains("HttpOnly"));
}

fn shopify_cart(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "checkoutUrl": "https://acme.myshopify.com/cart/c/1",
        "totalQuantity": 1,
        "lines": {"nodes": []},
        "cost": {
            "totalAmount": {"amount": "10.0", "currencyCode": "USD"},
            "subtotalAmount": {"amount": "10.0", "currencyCode": "USD"}
        },
        "discountCodes": []
    })
}

#[tokio::test]
async fn test_shopify_add_items_without_cookie_makes_no_call() {
    let app = TestApp::new();
    let mock = app.server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let response = app
        .invoke(
            "shopify/actions/cart/addItems.ts",
            json!({"lines": [{"merchandiseId": "gid://shopify/ProductVariant/1"}]}),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    mock.assert_hits(0);
}

#[tokio::test]
async fn test_shopify_add_items_rewrites_cookie() {
    let app = TestApp::new();
    let mock = app.server.mock(|when, then| {
        when.method(POST)
            .path("/shopify/storefront")
            .header("x-shopify-storefront-access-token", "storefront-token")
            .body_contains("cartLinesAdd")
            .body_contains(r#""quantity":1"#);
        then.status(200).json_body(json!({
            "data": {"payload": {"cart": shopify_cart("gid://shopify/Cart/1"), "userErrors": []}}
        }));
    });

    let response = app
        .invoke(
            "shopify/actions/cart/addItems.ts",
            json!({"lines": [{"merchandiseId": "gid://shopify/ProductVariant/1"}]}),
            &[("cookie", "shopify_cart_id=gid%3A%2F%2Fshopify%2FCart%2F1")],
        )
        .await;

    mock.assert();
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalQuantity"], 1);
    assert!(response.set_cookies()[0].starts_with("shopify_cart_id="));
}

#[tokio::test]
async fn test_shopify_user_errors_are_reported() {
    let app = TestApp::new();
    app.server.mock(|when, then| {
        when.method(POST).path("/shopify/storefront");
        then.status(200).json_body(json!({
            "data": {"payload": {
                "cart": null,
                "userErrors": [{"field": ["lines"], "message": "Merchandise is sold out"}]
            }}
        }));
    });

    let response = app
        .invoke(
            "shopify/actions/cart/addItems.ts",
            json!({"lines": [{"merchandiseId": "gid://shopify/ProductVariant/1"}]}),
            &[("cookie", "shopify_cart_id=abc")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.set_cookies().is_empty());
}
