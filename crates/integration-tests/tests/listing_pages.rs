//! Listing pages mapped end to end from mocked vendor responses.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use commerce_apps_integration_tests::TestApp;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_wake_listing_page_from_referer() {
    let app = TestApp::new();
    let mock = app.server.mock(|when, then| {
        when.method(POST)
            .path("/wake/graphql")
            .body_contains("query Search")
            .body_contains(r#""query":"caneca""#)
            .body_contains(r#""sortDirection":"ASC""#)
            .body_contains(r#""sortKey":"PRICE""#)
            .body_contains(r#""first":24"#);
        then.status(200).json_body(json!({
            "data": {"search": {
                "breadcrumbs": [{"text": "Cozinha", "link": "/cozinha"}],
                "products": {
                    "nodes": [{"productId": 1, "productVariantId": 2, "productName": "Caneca Azul"}],
                    "pageInfo": {"hasNextPage": true, "hasPreviousPage": false},
                    "totalCount": 30
                }
            }}
        }));
    });

    let response = app
        .invoke(
            "wake/loaders/productListingPage.ts",
            json!({"first": 24}),
            &[("referer", "https://loja.example.com/busca?busca=caneca&sort=ASC:PRICE")],
        )
        .await;

    mock.assert();
    assert_eq!(response.status, StatusCode::OK);
    let page = &response.body;
    assert_eq!(page["@type"], "ProductListingPage");
    assert_eq!(page["pageInfo"]["records"], 30);
    assert_eq!(page["pageInfo"]["recordPerPage"], 24);
    assert!(page["pageInfo"]["nextPage"].as_str().unwrap().ends_with("page=1"));
    assert!(page["pageInfo"]["previousPage"].is_null());
    assert_eq!(page["sortOptions"].as_array().unwrap().len(), 7);

    let product = &page["products"][0];
    let url = product["url"].as_str().unwrap();
    assert!(url.starts_with("https://loja.example.com/produto/"));
    assert!(url.ends_with("-1?skuId=2"));
    assert_eq!(
        page["breadcrumb"]["itemListElement"][0]["item"],
        "https://loja.example.com/cozinha"
    );
}

#[tokio::test]
async fn test_vtex_listing_page_resolves_every_path_prefix() {
    let app = TestApp::new();
    let department = app.server.mock(|when, then| {
        when.method(GET)
            .path("/api/catalog_system/pub/portal/pagetype/masculino");
        then.status(200).json_body(json!({
            "pageType": "Department",
            "name": "Masculino",
            "url": "acme.vtexcommercestable.com.br/masculino",
            "title": "Masculino"
        }));
    });
    let category = app.server.mock(|when, then| {
        when.method(GET)
            .path("/api/catalog_system/pub/portal/pagetype/masculino/camisas");
        then.status(200).json_body(json!({
            "pageType": "Category",
            "name": "Camisas",
            "url": "acme.vtexcommercestable.com.br/masculino/camisas",
            "title": "Camisas Masculinas",
            "metaTagDescription": "Camisas para homens"
        }));
    });
    let search = app.server.mock(|when, then| {
        when.method(GET)
            .path("/api/catalog_system/pub/products/search/masculino/camisas")
            .query_param("map", "c,c")
            .query_param("sc", "1")
            .query_param("_from", "0")
            .query_param("_to", "11");
        then.status(200)
            .header("resources", "0-11/30")
            .json_body(json!([]));
    });
    let facets = app.server.mock(|when, then| {
        when.method(GET)
            .path("/api/catalog_system/pub/facets/search/masculino/camisas")
            .query_param("map", "c,c");
        then.status(200).json_body(json!({}));
    });

    let response = app
        .invoke(
            "vtex/loaders/legacy/productListingPage.ts",
            json!(null),
            &[("referer", "https://shop.example.com/masculino/camisas")],
        )
        .await;

    department.assert();
    category.assert();
    search.assert();
    facets.assert();
    assert_eq!(response.status, StatusCode::OK);

    let page = &response.body;
    assert_eq!(page["pageInfo"]["records"], 30);
    assert_eq!(page["pageInfo"]["nextPage"], "?page=1");
    assert_eq!(page["breadcrumb"]["numberOfItems"], 2);
    assert_eq!(page["seo"]["title"], "Camisas Masculinas");
    assert_eq!(page["seo"]["description"], "Camisas para homens");
    assert_eq!(
        page["seo"]["canonical"],
        "https://shop.example.com/masculino/camisas"
    );
}
