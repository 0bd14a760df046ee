//! Product page by `linkText`.

use commerce_apps_core::{ProductDetailsPage, Seo};
use serde::Deserialize;
use tracing::instrument;

use super::{base_query, search_path};
use crate::client::{RestResponse, STALE};
use crate::context::InvokeContext;
use crate::error::Result;
use crate::vtex::Vtex;
use crate::vtex::transform::{to_breadcrumb_list, to_product};
use crate::vtex::types::LegacyProduct;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {
    /// Product `linkText`.
    pub slug: String,
}

/// # Errors
///
/// Returns the client error of the search call.
#[instrument(skip(vtex, ctx))]
pub async fn loader(
    vtex: &Vtex,
    props: Props,
    ctx: &InvokeContext,
) -> Result<Option<ProductDetailsPage>> {
    let response: RestResponse<Vec<LegacyProduct>> = vtex
        .api
        .get(&search_path(&format!("{}/p", props.slug)), &base_query(vtex), STALE)
        .await?;

    let Some(product) = response.body.into_iter().next() else {
        return Ok(None);
    };
    let sku_id = ctx.query_param("skuId");
    let Some(sku) = sku_id
        .as_deref()
        .and_then(|id| product.items.iter().find(|item| item.item_id == id))
        .or_else(|| product.items.first())
    else {
        return Ok(None);
    };

    let mapped = to_product(&product, sku, &ctx.url, 0);
    let seo = Seo {
        title: product
            .product_title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| product.product_name.clone()),
        description: product.meta_tag_description.clone().unwrap_or_default(),
        canonical: mapped
            .is_variant_of
            .as_ref()
            .and_then(|g| g.url.clone())
            .unwrap_or_default(),
    };

    Ok(Some(ProductDetailsPage {
        breadcrumb_list: to_breadcrumb_list(&product, &ctx.url),
        product: mapped,
        seo: Some(seo),
    }))
}
