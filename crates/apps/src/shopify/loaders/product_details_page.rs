//! Product page by handle.

use commerce_apps_core::{ProductDetailsPage, Seo};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::client::GraphqlRequest;
use crate::context::InvokeContext;
use crate::error::Result;
use crate::shopify::Shopify;
use crate::shopify::queries::{GET_PRODUCT, PRODUCT, PRODUCT_VARIANT};
use crate::shopify::transform::{numeric_id, to_breadcrumb_list, to_product};
use crate::shopify::types::{GetProductData, Product, ProductVariant};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {
    /// Product handle.
    pub slug: String,
}

/// The variant named by `skuId`, else the first one.
fn pick_variant<'a>(product: &'a Product, sku_id: Option<&str>) -> Option<&'a ProductVariant> {
    let variants = &product.variants.nodes;
    sku_id
        .and_then(|sku| variants.iter().find(|v| numeric_id(&v.id) == sku))
        .or_else(|| variants.first())
}

/// # Errors
///
/// Returns the client error of the product query.
#[instrument(skip(shopify, ctx))]
pub async fn loader(
    shopify: &Shopify,
    props: Props,
    ctx: &InvokeContext,
) -> Result<Option<ProductDetailsPage>> {
    let data: GetProductData = shopify
        .storefront
        .query(GraphqlRequest::new(
            GET_PRODUCT,
            &[PRODUCT, PRODUCT_VARIANT],
            json!({ "handle": props.slug }),
        ))
        .await?;

    let Some(product) = data.product else {
        return Ok(None);
    };
    let sku_id = ctx.query_param("skuId");
    let Some(variant) = pick_variant(&product, sku_id.as_deref()) else {
        return Ok(None);
    };

    let mapped = to_product(&product, variant, &ctx.url, 0);
    let seo = product.seo.as_ref().map(|seo| Seo {
        title: seo.title.clone().unwrap_or_else(|| product.title.clone()),
        description: seo
            .description
            .clone()
            .unwrap_or_else(|| product.description.clone()),
        canonical: mapped
            .is_variant_of
            .as_ref()
            .and_then(|g| g.url.clone())
            .unwrap_or_default(),
    });

    Ok(Some(ProductDetailsPage {
        breadcrumb_list: to_breadcrumb_list(&mapped),
        product: mapped,
        seo,
    }))
}
