//! Wake commerce adapter.
//!
//! # APIs
//!
//! ## Storefront API (GraphQL)
//! - Products, search, checkout
//! - Authenticated with the `TCS-Access-Token` header
//!
//! ## REST API
//! - `GET /produtos` product listing
//! - Authenticated with `Authorization: Basic {token}`

pub mod actions;
pub mod analytics;
pub mod cart;
pub mod fragments;
pub mod loaders;
pub mod transform;
pub mod types;

use serde_json::Value;
use secrecy::ExposeSecret;

use crate::client::{ClientError, GraphqlClient, RestClient, sensitive_headers};
use crate::config::WakeConfig;
use crate::context::InvokeContext;
use crate::error::{AppError, Result};
use crate::manifest::{Manifest, output, props};

pub const MANIFEST: Manifest = Manifest {
    name: "wake",
    loaders: &[
        "wake/loaders/productDetailsPage.ts",
        "wake/loaders/productList.ts",
        "wake/loaders/productListingPage.ts",
        "wake/loaders/cart.ts",
    ],
    actions: &[
        "wake/actions/cart/addItem.ts",
        "wake/actions/cart/updateItemQuantity.ts",
        "wake/actions/cart/addCoupon.ts",
        "wake/actions/cart/removeCoupon.ts",
    ],
};

/// Wake app state: REST and Storefront clients.
#[derive(Debug, Clone)]
pub struct Wake {
    pub api: RestClient,
    pub storefront: GraphqlClient,
}

impl Wake {
    /// Build the Wake clients.
    ///
    /// # Errors
    ///
    /// Returns an error if a token is not a valid header value or an endpoint
    /// is not a valid URL.
    pub fn new(config: &WakeConfig) -> std::result::Result<Self, ClientError> {
        let basic = format!("Basic {}", config.api_token.expose_secret());
        let api = RestClient::new(
            &config.api_base_url,
            sensitive_headers(&[("authorization", &basic)])?,
        )?;
        let storefront = GraphqlClient::new(
            &config.storefront_endpoint,
            sensitive_headers(&[(
                "tcs-access-token",
                config.storefront_token.expose_secret(),
            )])?,
        )?;

        tracing::info!(
            api = %config.api_base_url,
            storefront = %config.storefront_endpoint,
            "Wake app configured"
        );

        Ok(Self { api, storefront })
    }

    /// Run a Wake block by key.
    ///
    /// # Errors
    ///
    /// `UnknownBlock` for keys outside [`MANIFEST`], otherwise whatever the
    /// block fails with.
    pub async fn invoke(&self, key: &str, raw: Value, ctx: &mut InvokeContext) -> Result<Value> {
        match key {
            "wake/loaders/productDetailsPage.ts" => {
                output(loaders::product_details_page::loader(self, props(raw)?, ctx).await?)
            }
            "wake/loaders/productList.ts" => {
                output(loaders::product_list::loader(self, props(raw)?, ctx).await?)
            }
            "wake/loaders/productListingPage.ts" => {
                output(loaders::product_listing_page::loader(self, props(raw)?, ctx).await?)
            }
            "wake/loaders/cart.ts" => output(loaders::cart::loader(self, props(raw)?, ctx).await?),
            "wake/actions/cart/addItem.ts" => {
                output(actions::cart::add_item(self, props(raw)?, ctx).await?)
            }
            "wake/actions/cart/updateItemQuantity.ts" => {
                output(actions::cart::update_item_quantity(self, props(raw)?, ctx).await?)
            }
            "wake/actions/cart/addCoupon.ts" => {
                output(actions::cart::add_coupon(self, props(raw)?, ctx).await?)
            }
            "wake/actions/cart/removeCoupon.ts" => {
                output(actions::cart::remove_coupon(self, props(raw)?, ctx).await?)
            }
            _ => Err(AppError::UnknownBlock(key.to_string())),
        }
    }
}
