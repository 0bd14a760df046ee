//! Product shelf from a Storefront product query.

use commerce_apps_core::Product;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::client::GraphqlRequest;
use crate::context::InvokeContext;
use crate::error::Result;
use crate::shopify::Shopify;
use crate::shopify::queries::{LIST_PRODUCTS, PRODUCT, PRODUCT_VARIANT};
use crate::shopify::transform::to_product;
use crate::shopify::types::ListProductsData;

/// Storefront sort choices, as used in `?sort=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    #[default]
    #[serde(rename = "")]
    Relevance,
    PriceAscending,
    PriceDescending,
    BestSelling,
    TitleAscending,
    TitleDescending,
    CreatedDescending,
}

impl Sort {
    /// Parse a `?sort=` value; unknown values read as relevance.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        value
            .and_then(|v| serde_json::from_value(json!(v)).ok())
            .unwrap_or_default()
    }

    /// `(sortKey, reverse)` for `products` and collection products.
    #[must_use]
    pub const fn product_key(self) -> (&'static str, bool) {
        match self {
            Self::Relevance => ("RELEVANCE", false),
            Self::PriceAscending => ("PRICE", false),
            Self::PriceDescending => ("PRICE", true),
            Self::BestSelling => ("BEST_SELLING", false),
            Self::TitleAscending => ("TITLE", false),
            Self::TitleDescending => ("TITLE", true),
            Self::CreatedDescending => ("CREATED", true),
        }
    }

    /// `(sortKey, reverse)` for `search`, which only sorts by relevance or
    /// price.
    #[must_use]
    pub const fn search_key(self) -> (&'static str, bool) {
        match self {
            Self::PriceAscending => ("PRICE", false),
            Self::PriceDescending => ("PRICE", true),
            _ => ("RELEVANCE", false),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {
    /// Storefront search syntax, e.g. `tag:sale`.
    #[serde(default)]
    pub query: String,
    pub count: Option<i64>,
    #[serde(default)]
    pub sort: Sort,
}

/// # Errors
///
/// Returns the client error of the product query.
#[instrument(skip(shopify, ctx))]
pub async fn loader(shopify: &Shopify, props: Props, ctx: &InvokeContext) -> Result<Vec<Product>> {
    let (sort_key, reverse) = props.sort.product_key();
    let data: ListProductsData = shopify
        .storefront
        .query(GraphqlRequest::new(
            LIST_PRODUCTS,
            &[PRODUCT, PRODUCT_VARIANT],
            json!({
                "first": props.count.unwrap_or(12),
                "query": props.query,
                "sortKey": sort_key,
                "reverse": reverse,
            }),
        ))
        .await?;

    Ok(data
        .products
        .nodes
        .iter()
        .filter_map(|product| {
            product
                .variants
                .nodes
                .first()
                .map(|variant| to_product(product, variant, &ctx.url, 0))
        })
        .collect())
}
