//! Product shelf from a full-text query or a collection.

use commerce_apps_core::Product;
use serde::Deserialize;
use tracing::instrument;

use super::{base_query, search_path};
use crate::client::{RestResponse, STALE};
use crate::context::InvokeContext;
use crate::error::Result;
use crate::vtex::Vtex;
use crate::vtex::transform::to_product;
use crate::vtex::types::LegacyProduct;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {
    /// Full-text term.
    pub query: Option<String>,
    /// Collection (product cluster) id.
    pub collection: Option<String>,
    pub count: Option<u32>,
    /// Legacy `O` order, e.g. `OrderByTopSaleDESC`.
    pub sort: Option<String>,
}

impl Props {
    fn query_pairs(&self, vtex: &Vtex) -> Vec<(String, String)> {
        let count = self.count.unwrap_or(12).max(1);
        let mut query = base_query(vtex);
        query.push(("_from".to_string(), "0".to_string()));
        query.push(("_to".to_string(), (count - 1).to_string()));
        if let Some(ft) = &self.query {
            query.push(("ft".to_string(), ft.clone()));
        }
        if let Some(collection) = &self.collection {
            query.push(("fq".to_string(), format!("productClusterIds:{collection}")));
        }
        if let Some(sort) = &self.sort {
            query.push(("O".to_string(), sort.clone()));
        }
        query
    }
}

/// # Errors
///
/// Returns the client error of the search call.
#[instrument(skip(vtex, ctx))]
pub async fn loader(vtex: &Vtex, props: Props, ctx: &InvokeContext) -> Result<Vec<Product>> {
    let response: RestResponse<Vec<LegacyProduct>> = vtex
        .api
        .get(&search_path(""), &props.query_pairs(vtex), STALE)
        .await?;

    Ok(response
        .body
        .iter()
        .filter_map(|product| {
            product
                .items
                .first()
                .map(|sku| to_product(product, sku, &ctx.url, 0))
        })
        .collect())
}
