//! VTEX adapter on the legacy Catalog System REST API
//! (`https://{account}.{environment}.com.br`).

pub mod legacy;
pub mod loaders;
pub mod transform;
pub mod types;

use serde_json::Value;

use crate::client::{ClientError, RestClient};
use crate::config::VtexConfig;
use crate::context::InvokeContext;
use crate::error::{AppError, Result};
use crate::manifest::{Manifest, output, props};

pub const MANIFEST: Manifest = Manifest {
    name: "vtex",
    loaders: &[
        "vtex/loaders/legacy/productDetailsPage.ts",
        "vtex/loaders/legacy/productList.ts",
        "vtex/loaders/legacy/productListingPage.ts",
    ],
    actions: &[],
};

#[derive(Debug, Clone)]
pub struct Vtex {
    pub api: RestClient,
    pub sales_channel: String,
}

impl Vtex {
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(config: &VtexConfig) -> std::result::Result<Self, ClientError> {
        let api = RestClient::new(&config.base_url, reqwest::header::HeaderMap::new())?;
        tracing::info!(account = %config.account, base_url = %config.base_url, "VTEX app configured");
        Ok(Self {
            api,
            sales_channel: config.sales_channel.clone(),
        })
    }

    /// Run a VTEX block by key.
    ///
    /// # Errors
    ///
    /// `UnknownBlock` for keys outside [`MANIFEST`], otherwise whatever the
    /// block fails with.
    pub async fn invoke(&self, key: &str, raw: Value, ctx: &mut InvokeContext) -> Result<Value> {
        use loaders::legacy as pages;

        match key {
            "vtex/loaders/legacy/productDetailsPage.ts" => {
                output(pages::product_details_page::loader(self, props(raw)?, ctx).await?)
            }
            "vtex/loaders/legacy/productList.ts" => {
                output(pages::product_list::loader(self, props(raw)?, ctx).await?)
            }
            "vtex/loaders/legacy/productListingPage.ts" => {
                output(pages::product_listing_page::loader(self, props(raw)?, ctx).await?)
            }
            _ => Err(AppError::UnknownBlock(key.to_string())),
        }
    }
}
