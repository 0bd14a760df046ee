//! Search or collection listing page with cursor pagination.

use commerce_apps_core::{
    BreadcrumbList, ListItem, PageInfo, ProductListingPage, Seo, SortOption,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::client::GraphqlRequest;
use crate::context::InvokeContext;
use crate::error::Result;
use crate::shopify::Shopify;
use crate::shopify::loaders::product_list::Sort;
use crate::shopify::queries::{
    FILTER, PRODUCT, PRODUCT_VARIANT, PRODUCTS_BY_COLLECTION, SEARCH_PRODUCTS,
};
use crate::shopify::transform::{filters_from_url, to_filters, to_product};
use crate::shopify::types::{
    CollectionData, PageInfo as CursorInfo, Product, ProductFilter, SearchProductsData,
};
use crate::urls::{query_pairs, search_string, with_path};

#[must_use]
pub fn sort_options() -> Vec<SortOption> {
    [
        ("", "relevance:desc"),
        ("price-ascending", "price:asc"),
        ("price-descending", "price:desc"),
        ("best-selling", "orders:desc"),
        ("title-ascending", "name:asc"),
        ("title-descending", "name:desc"),
        ("created-descending", "release:desc"),
    ]
    .into_iter()
    .map(|(value, label)| SortOption::new(value, label))
    .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {
    /// Collection handle; without it the page is a search on `?q=`.
    pub collection: Option<String>,
    /// Products per page.
    pub count: Option<i64>,
}

/// One page of products, whichever query produced it.
#[derive(Debug, Default)]
struct Listing {
    products: Vec<Product>,
    filters: Vec<ProductFilter>,
    cursors: CursorInfo,
    total: Option<i64>,
    title: Option<(String, String)>,
}

/// `first`/`after` or, when paging backwards, `last`/`before`.
fn window(ctx: &InvokeContext, count: i64) -> Value {
    match ctx.query_param("before") {
        Some(before) => json!({ "last": count, "before": before }),
        None => json!({ "first": count, "after": ctx.query_param("after") }),
    }
}

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
        base.extend(extra);
    }
    base
}

/// # Errors
///
/// Returns the client error of the search or collection query.
#[instrument(skip(shopify, ctx))]
pub async fn loader(
    shopify: &Shopify,
    props: Props,
    ctx: &InvokeContext,
) -> Result<Option<ProductListingPage>> {
    let count = props.count.unwrap_or(12);
    let sort = Sort::from_param(ctx.query_param("sort").as_deref());
    let filters = filters_from_url(&ctx.url);

    let listing = if let Some(handle) = props.collection {
        let (sort_key, reverse) = match sort {
            Sort::Relevance => ("COLLECTION_DEFAULT", false),
            _ => sort.product_key(),
        };
        let variables = merge(
            json!({
                "handle": handle,
                "filters": filters,
                "sortKey": sort_key,
                "reverse": reverse,
            }),
            window(ctx, count),
        );
        let data: CollectionData = shopify
            .storefront
            .query(GraphqlRequest::new(
                PRODUCTS_BY_COLLECTION,
                &[PRODUCT, PRODUCT_VARIANT, FILTER],
                variables,
            ))
            .await?;

        let Some(collection) = data.collection else {
            return Ok(None);
        };
        let seo = collection.seo.unwrap_or_default();
        Listing {
            title: Some((
                seo.title.unwrap_or(collection.title),
                seo.description.unwrap_or(collection.description),
            )),
            products: collection.products.nodes,
            filters: collection.products.filters,
            cursors: collection.products.page_info,
            total: None,
        }
    } else {
        let (sort_key, reverse) = sort.search_key();
        let variables = merge(
            json!({
                "query": ctx.query_param("q").unwrap_or_default(),
                "productFilters": filters,
                "sortKey": sort_key,
                "reverse": reverse,
            }),
            window(ctx, count),
        );
        let data: SearchProductsData = shopify
            .storefront
            .query(GraphqlRequest::new(
                SEARCH_PRODUCTS,
                &[PRODUCT, PRODUCT_VARIANT, FILTER],
                variables,
            ))
            .await?;

        Listing {
            products: data.search.nodes,
            filters: data.search.product_filters,
            cursors: data.search.page_info,
            total: data.search.total_count,
            title: None,
        }
    };

    Ok(Some(to_listing_page(listing, ctx, count)))
}

fn to_listing_page(listing: Listing, ctx: &InvokeContext, count: i64) -> ProductListingPage {
    let url = &ctx.url;
    let page = ctx
        .query_param("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(0);

    // Cursor links replace both cursors and move the page counter.
    let link = |cursor_key: &str, cursor: &str, page: i64| {
        let mut pairs: Vec<_> = query_pairs(url)
            .into_iter()
            .filter(|(k, _)| !matches!(k.as_str(), "after" | "before" | "page"))
            .collect();
        pairs.push((cursor_key.to_string(), cursor.to_string()));
        pairs.push(("page".to_string(), page.to_string()));
        search_string(&pairs)
    };
    let cursors = &listing.cursors;
    let next_page = cursors
        .end_cursor
        .as_deref()
        .filter(|_| cursors.has_next_page)
        .map(|cursor| link("after", cursor, page.saturating_add(1)));
    let previous_page = cursors
        .start_cursor
        .as_deref()
        .filter(|_| cursors.has_previous_page)
        .map(|cursor| link("before", cursor, page.saturating_sub(1)));

    let products = listing
        .products
        .iter()
        .filter_map(|product| {
            product
                .variants
                .nodes
                .first()
                .map(|variant| to_product(product, variant, url, 0))
        })
        .collect();

    let canonical = with_path(url, url.path()).to_string();
    let (breadcrumb, seo) = match listing.title {
        Some((title, description)) => (
            BreadcrumbList::new(vec![ListItem {
                name: Some(title.clone()),
                item: Some(canonical.clone()),
                position: 1,
            }]),
            Some(Seo {
                title,
                description,
                canonical,
            }),
        ),
        None => (BreadcrumbList::default(), None),
    };

    ProductListingPage {
        breadcrumb,
        filters: to_filters(&listing.filters, url),
        products,
        page_info: PageInfo {
            current_page: page,
            next_page,
            previous_page,
            records: listing.total,
            record_per_page: Some(count),
        },
        sort_options: sort_options(),
        seo,
    }
}
