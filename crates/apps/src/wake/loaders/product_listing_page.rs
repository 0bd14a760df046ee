//! Search/category listing page.

use commerce_apps_core::{BreadcrumbList, ListItem, PageInfo, ProductListingPage, SortOption};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::client::GraphqlRequest;
use crate::context::InvokeContext;
use crate::error::Result;
use crate::urls::{absolute, query_pairs, search_string, with_param};
use crate::wake::Wake;
use crate::wake::fragments::{PRODUCT, SEARCH};
use crate::wake::transform::{filters_from_url, to_filters, to_product};
use crate::wake::types::{Search, SearchData};

const DEFAULT_FIRST: i64 = 12;
const DEFAULT_SORT: (&str, &str) = ("DESC", "SALES");

/// Sort choices offered on Wake listing pages.
#[must_use]
pub fn sort_options() -> Vec<SortOption> {
    [
        ("ASC:NAME", "Nome A-Z"),
        ("DESC:NAME", "Nome Z-A"),
        ("DESC:RELEASE_DATE", "Lançamentos"),
        ("ASC:PRICE", "Menores Preços"),
        ("DESC:PRICE", "Maiores Preços"),
        ("DESC:DISCOUNT", "Maiores Descontos"),
        ("DESC:SALES", "Mais Vendidos"),
    ]
    .into_iter()
    .map(|(value, label)| SortOption::new(value, label))
    .collect()
}

/// How query terms combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {
    /// Number of products to display.
    pub first: Option<i64>,
    pub operation: Option<Operation>,
}

/// Split a `DIRECTION:KEY` sort value; anything else falls back to
/// `DESC:SALES`.
fn parse_sort(sort: Option<&str>) -> (String, String) {
    sort.and_then(|s| s.split_once(':'))
        .filter(|(direction, key)| matches!(*direction, "ASC" | "DESC") && !key.is_empty())
        .map_or_else(
            || (DEFAULT_SORT.0.to_string(), DEFAULT_SORT.1.to_string()),
            |(direction, key)| (direction.to_string(), key.to_string()),
        )
}

/// Run a search for the page's `busca`, `sort`, `page` and `filtro` params.
///
/// # Errors
///
/// Returns the client error of the search query.
#[instrument(skip(wake, ctx))]
pub async fn loader(wake: &Wake, props: Props, ctx: &InvokeContext) -> Result<ProductListingPage> {
    let url = &ctx.url;
    let first = props.first.unwrap_or(DEFAULT_FIRST);
    let (sort_direction, sort_key) = parse_sort(ctx.query_param("sort").as_deref());
    let page = ctx
        .query_param("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(0);
    let query = ctx.query_param("busca");
    let operation = props.operation.unwrap_or_default();
    let filters = filters_from_url(url);

    let data: SearchData = wake
        .storefront
        .query(GraphqlRequest::new(
            SEARCH,
            &[PRODUCT],
            json!({
                "query": query,
                "operation": operation,
                "first": first,
                "sortDirection": sort_direction,
                "sortKey": sort_key,
                "filters": (!filters.is_empty()).then_some(filters),
            }),
        ))
        .await?;

    let search = data.search.unwrap_or_default();
    Ok(to_listing_page(&search, ctx, page, first))
}

fn to_listing_page(search: &Search, ctx: &InvokeContext, page: i64, first: i64) -> ProductListingPage {
    let url = &ctx.url;
    let connection = search.products.as_ref();
    let page_info = connection.and_then(|c| c.page_info).unwrap_or_default();
    let params = query_pairs(url);
    let page_link = |page: i64| search_string(&with_param(&params, "page", &page.to_string()));

    let products = connection
        .and_then(|c| c.nodes.as_ref())
        .into_iter()
        .flatten()
        .flatten()
        .map(|node| to_product(node, url))
        .collect();

    let breadcrumb = BreadcrumbList::new(
        search
            .breadcrumbs
            .iter()
            .flatten()
            .flatten()
            .enumerate()
            .map(|(i, crumb)| ListItem {
                name: crumb.text.clone(),
                item: crumb.link.as_deref().map(|link| absolute(url, link)),
                position: i + 1,
            })
            .collect(),
    );

    ProductListingPage {
        breadcrumb,
        filters: to_filters(search.aggregations.as_ref(), url),
        products,
        page_info: PageInfo {
            current_page: page,
            next_page: page_info
                .has_next_page
                .then(|| page_link(page.saturating_add(1))),
            previous_page: page_info
                .has_previous_page
                .then(|| page_link(page.saturating_sub(1))),
            records: connection.and_then(|c| c.total_count),
            record_per_page: Some(first),
        },
        sort_options: sort_options(),
        seo: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderMap;
    use url::Url;

    use super::*;

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_sort(Some("ASC:PRICE")),
            ("ASC".to_string(), "PRICE".to_string())
        );
        assert_eq!(
            parse_sort(None),
            ("DESC".to_string(), "SALES".to_string())
        );
        assert_eq!(
            parse_sort(Some("price")),
            ("DESC".to_string(), "SALES".to_string())
        );
    }

    #[test]
    fn test_sort_options_labels() {
        let options = sort_options();
        assert_eq!(options.len(), 7);
        assert_eq!(options[0], SortOption::new("ASC:NAME", "Nome A-Z"));
        assert_eq!(options[6], SortOption::new("DESC:SALES", "Mais Vendidos"));
    }

    #[test]
    fn test_listing_page_pagination_links() {
        let ctx = InvokeContext::new(
            Url::parse("https://shop.example.com/busca?busca=caneca&page=2").unwrap(),
            HeaderMap::new(),
        );
        let search: Search = serde_json::from_value(json!({
            "breadcrumbs": [{"text": "Casa", "link": "/casa"}],
            "products": {
                "nodes": [{"productId": 1, "productVariantId": 2, "productName": "Caneca"}, null],
                "pageInfo": {"hasNextPage": true, "hasPreviousPage": true},
                "totalCount": 40
            }
        }))
        .unwrap();

        let page = to_listing_page(&search, &ctx, 2, 12);
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.page_info.current_page, 2);
        assert_eq!(page.page_info.next_page.as_deref(), Some("?busca=caneca&page=3"));
        assert_eq!(page.page_info.previous_page.as_deref(), Some("?busca=caneca&page=1"));
        assert_eq!(page.page_info.records, Some(40));
        assert_eq!(page.page_info.record_per_page, Some(12));
        assert_eq!(page.breadcrumb.number_of_items, 1);
        assert_eq!(
            page.breadcrumb.item_list_element[0].item.as_deref(),
            Some("https://shop.example.com/casa")
        );
    }

    #[test]
    fn test_pagination_links_saturate_at_the_edges() {
        let ctx = InvokeContext::new(
            Url::parse("https://shop.example.com/busca?page=9223372036854775807").unwrap(),
            HeaderMap::new(),
        );
        let search: Search = serde_json::from_value(json!({
            "products": {"pageInfo": {"hasNextPage": true, "hasPreviousPage": true}}
        }))
        .unwrap();

        let page = to_listing_page(&search, &ctx, i64::MAX, 12);
        assert_eq!(
            page.page_info.next_page.as_deref(),
            Some("?page=9223372036854775807")
        );
        let page = to_listing_page(&search, &ctx, i64::MIN, 12);
        assert_eq!(
            page.page_info.previous_page.as_deref(),
            Some("?page=-9223372036854775808")
        );
    }

    #[test]
    fn test_listing_page_without_more_pages() {
        let ctx = InvokeContext::new(
            Url::parse("https://shop.example.com/busca").unwrap(),
            HeaderMap::new(),
        );
        let page = to_listing_page(&Search::default(), &ctx, 0, 12);
        assert!(page.products.is_empty());
        assert!(page.page_info.next_page.is_none());
        assert!(page.page_info.previous_page.is_none());
        assert!(page.filters.is_empty());
    }
}
