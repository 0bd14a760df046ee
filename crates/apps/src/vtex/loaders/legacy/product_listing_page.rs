//! Category, brand, collection and full-text listing pages.

use commerce_apps_core::{BreadcrumbList, PageInfo, ProductListingPage};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use tracing::instrument;

use super::{base_query, search_path};
use crate::client::{RestResponse, STALE};
use crate::context::InvokeContext;
use crate::error::{AppError, Result};
use crate::urls::{query_pairs, search_string, with_param};
use crate::vtex::Vtex;
use crate::vtex::legacy::{
    get_map_and_term, page_types_from_pathname, page_types_to_breadcrumb_list, page_types_to_seo,
};
use crate::vtex::transform::{legacy_facets_to_filters, sort_options, to_product};
use crate::vtex::types::{LegacyFacets, LegacyProduct};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {
    /// Path to resolve; defaults to the page URL's path.
    pub term: Option<String>,
    /// Products per page.
    pub count: Option<u32>,
}

/// Total from a `resources: 0-11/120` header.
fn total_records(headers: &HeaderMap) -> Option<i64> {
    headers
        .get("resources")?
        .to_str()
        .ok()?
        .split_once('/')?
        .1
        .trim()
        .parse()
        .ok()
}

/// `_from`/`_to` of a zero-based page, `None` when it does not fit an `i64`.
fn page_window(page: i64, count: i64) -> Option<(i64, i64)> {
    let from = page.checked_mul(count)?;
    let to = page.checked_add(1)?.checked_mul(count)?.checked_sub(1)?;
    Some((from, to))
}

/// # Errors
///
/// 400 when `page` is out of range, otherwise the client error of the
/// page-type, search or facets calls.
#[instrument(skip(vtex, ctx))]
pub async fn loader(
    vtex: &Vtex,
    props: Props,
    ctx: &InvokeContext,
) -> Result<ProductListingPage> {
    let url = &ctx.url;
    let count = i64::from(props.count.unwrap_or(12).max(1));
    let page = ctx
        .query_param("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(0)
        .max(0);
    let (from, to) = page_window(page, count)
        .ok_or_else(|| AppError::BadRequest(format!("page {page} is out of range")))?;
    let path_term = props.term.unwrap_or_else(|| url.path().to_string());

    let page_types = page_types_from_pathname(vtex, &path_term).await?;
    let (map, term) = match ctx.query_param("map") {
        Some(map) => (map, path_term.trim_matches('/').to_string()),
        None => get_map_and_term(&page_types),
    };

    let mut args = base_query(vtex);
    if !map.is_empty() {
        args.push(("map".to_string(), map.clone()));
    }
    for (param, key) in [("O", "O"), ("q", "ft"), ("ft", "ft"), ("fq", "fq")] {
        if let Some(value) = ctx.query_param(param).filter(|v| !v.is_empty())
            && !args.iter().any(|(k, _)| k == key)
        {
            args.push((key.to_string(), value));
        }
    }
    let mut search_args = args.clone();
    search_args.push(("_from".to_string(), from.to_string()));
    search_args.push(("_to".to_string(), to.to_string()));

    let products_path = search_path(&term);
    let facets_path = format!("/api/catalog_system/pub/facets/search/{}", term.trim_matches('/'));
    let (products, facets): (RestResponse<Vec<LegacyProduct>>, RestResponse<LegacyFacets>) = tokio::try_join!(
        vtex.api.get(&products_path, &search_args, STALE),
        vtex.api.get(&facets_path, &args, STALE),
    )?;

    let records = total_records(&products.headers);
    let params = query_pairs(url);
    let has_next = records.is_some_and(|total| to.saturating_add(1) < total);

    Ok(ProductListingPage {
        breadcrumb: BreadcrumbList::new(page_types_to_breadcrumb_list(&page_types, url)),
        filters: legacy_facets_to_filters(&facets.body, url, &map, &term),
        products: products
            .body
            .iter()
            .filter_map(|product| {
                product
                    .items
                    .first()
                    .map(|sku| to_product(product, sku, url, 0))
            })
            .collect(),
        page_info: PageInfo {
            current_page: page,
            next_page: has_next
                .then(|| search_string(&with_param(&params, "page", &page.saturating_add(1).to_string()))),
            previous_page: (page > 0)
                .then(|| search_string(&with_param(&params, "page", &(page - 1).to_string()))),
            records,
            record_per_page: Some(count),
        },
        sort_options: sort_options(),
        seo: page_types_to_seo(&page_types, url),
    })
}
