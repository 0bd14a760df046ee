//! Integration tests for the commerce apps invoke host.
//!
//! Every vendor app is pointed at one [`httpmock::MockServer`] and the
//! `/live` router is driven in-process with `tower::ServiceExt::oneshot`,
//! so no network or running server is needed.
//!
//! # Mock Layout
//!
//! | app     | mocked path                              |
//! |---------|------------------------------------------|
//! | Shopify | `POST /shopify/storefront`, `POST /shopify/admin` |
//! | VTEX    | `GET /api/catalog_system/...`            |
//! | Wake    | `POST /wake/graphql`, `GET /wake/...`    |
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p commerce-apps-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use commerce_apps::config::{SentryConfig, ShopifyConfig, VtexConfig, WakeConfig};
use commerce_apps::{AppState, AppsConfig, routes};
use httpmock::MockServer;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

pub const BASE_URL: &str = "https://shop.example.com";

/// A router whose apps all talk to one mock server.
pub struct TestApp {
    pub server: MockServer,
    router: Router,
}

/// Status, headers and decoded JSON body (`Null` for non-JSON bodies).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Every `Set-Cookie` value of the response.
    #[must_use]
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(String::from)
            .collect()
    }
}

/// Configuration with every app enabled against `server`.
#[must_use]
pub fn config(server: &MockServer) -> AppsConfig {
    let mut shopify = ShopifyConfig::new("acme", SecretString::from("storefront-token"));
    shopify.storefront_endpoint = server.url("/shopify/storefront");
    shopify.admin_endpoint = server.url("/shopify/admin");
    shopify.admin_access_token = Some(SecretString::from("admin-token"));

    let mut vtex = VtexConfig::new("acme");
    vtex.base_url = server.base_url();

    let mut wake = WakeConfig::new(SecretString::from("wake-token"));
    wake.api_base_url = server.url("/wake");
    wake.storefront_endpoint = server.url("/wake/graphql");

    AppsConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: BASE_URL.to_string(),
        shopify: Some(shopify),
        vtex: Some(vtex),
        wake: Some(wake),
        sentry: SentryConfig::default(),
    }
}

impl TestApp {
    /// Every app enabled.
    ///
    /// # Panics
    ///
    /// Panics if the vendor clients cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Start from the all-apps configuration and adjust it.
    ///
    /// # Panics
    ///
    /// Panics if the vendor clients cannot be built.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_config(adjust: impl FnOnce(&mut AppsConfig)) -> Self {
        let server = MockServer::start();
        let mut config = config(&server);
        adjust(&mut config);
        let state = AppState::new(config).expect("build vendor clients");
        Self {
            server,
            router: routes::app(state),
        }
    }

    /// Send a request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    #[allow(clippy::expect_used)]
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let body = body.map_or_else(Body::empty, |value| Body::from(value.to_string()));
        let request = builder.body(body).expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `POST /live/invoke/{key}` with `props` and extra headers.
    pub async fn invoke(&self, key: &str, props: Value, headers: &[(&str, &str)]) -> TestResponse {
        self.request(
            Method::POST,
            &format!("/live/invoke/{key}"),
            headers,
            Some(props),
        )
        .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
