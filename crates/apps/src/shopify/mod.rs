//! Shopify adapter.
//!
//! Two GraphQL clients against the same store:
//!
//! - Storefront API for products, search, collections and carts, with
//!   `X-Shopify-Storefront-Access-Token`
//! - Admin API for customer creation, with `X-Shopify-Access-Token` (sent
//!   empty when no admin token is configured)

pub mod actions;
pub mod cart;
pub mod loaders;
pub mod queries;
pub mod transform;
pub mod types;

use secrecy::ExposeSecret;
use serde_json::Value;

use crate::client::{ClientError, GraphqlClient, sensitive_headers};
use crate::config::ShopifyConfig;
use crate::context::InvokeContext;
use crate::error::{AppError, Result};
use crate::manifest::{Manifest, output, props};

pub const MANIFEST: Manifest = Manifest {
    name: "shopify",
    loaders: &[
        "shopify/loaders/productDetailsPage.ts",
        "shopify/loaders/productList.ts",
        "shopify/loaders/productListingPage.ts",
        "shopify/loaders/cart.ts",
    ],
    actions: &[
        "shopify/actions/cart/addItems.ts",
        "shopify/actions/cart/updateItems.ts",
        "shopify/actions/cart/updateCoupons.ts",
        "shopify/actions/customer/createCustomer.ts",
    ],
};

#[derive(Debug, Clone)]
pub struct Shopify {
    pub storefront: GraphqlClient,
    pub admin: GraphqlClient,
}

impl Shopify {
    /// Build the Storefront and Admin clients.
    ///
    /// # Errors
    ///
    /// Returns an error if a token is not a valid header value or an endpoint
    /// is not a valid URL.
    pub fn new(config: &ShopifyConfig) -> std::result::Result<Self, ClientError> {
        let storefront = GraphqlClient::new(
            &config.storefront_endpoint,
            sensitive_headers(&[(
                "x-shopify-storefront-access-token",
                config.storefront_access_token.expose_secret(),
            )])?,
        )?;
        let admin_token = config
            .admin_access_token
            .as_ref()
            .map_or("", |token| token.expose_secret());
        let admin = GraphqlClient::new(
            &config.admin_endpoint,
            sensitive_headers(&[("x-shopify-access-token", admin_token)])?,
        )?;

        tracing::info!(
            store = %config.store_name,
            api_version = %config.api_version,
            admin = config.admin_access_token.is_some(),
            "Shopify app configured"
        );

        Ok(Self { storefront, admin })
    }

    /// Run a Shopify block by key.
    ///
    /// # Errors
    ///
    /// `UnknownBlock` for keys outside [`MANIFEST`], otherwise whatever the
    /// block fails with.
    pub async fn invoke(&self, key: &str, raw: Value, ctx: &mut InvokeContext) -> Result<Value> {
        use actions::{cart as cart_actions, customer};

        match key {
            "shopify/loaders/productDetailsPage.ts" => {
                output(loaders::product_details_page::loader(self, props(raw)?, ctx).await?)
            }
            "shopify/loaders/productList.ts" => {
                output(loaders::product_list::loader(self, props(raw)?, ctx).await?)
            }
            "shopify/loaders/productListingPage.ts" => {
                output(loaders::product_listing_page::loader(self, props(raw)?, ctx).await?)
            }
            "shopify/loaders/cart.ts" => {
                output(loaders::cart::loader(self, props(raw)?, ctx).await?)
            }
            "shopify/actions/cart/addItems.ts" => {
                output(cart_actions::add_items(self, props(raw)?, ctx).await?)
            }
            "shopify/actions/cart/updateItems.ts" => {
                output(cart_actions::update_items(self, props(raw)?, ctx).await?)
            }
            "shopify/actions/cart/updateCoupons.ts" => {
                output(cart_actions::update_coupons(self, props(raw)?, ctx).await?)
            }
            "shopify/actions/customer/createCustomer.ts" => {
                output(customer::create_customer(self, props(raw)?, ctx).await?)
            }
            _ => Err(AppError::UnknownBlock(key.to_string())),
        }
    }
}
