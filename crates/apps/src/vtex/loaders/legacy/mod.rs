//! Loaders on the legacy Catalog System search API.

pub mod product_details_page;
pub mod product_list;
pub mod product_listing_page;

use crate::vtex::Vtex;

/// Search path for a term, `/api/catalog_system/pub/products/search/{term}`.
pub(crate) fn search_path(term: &str) -> String {
    format!(
        "/api/catalog_system/pub/products/search/{}",
        term.trim_matches('/')
    )
}

/// Query pairs shared by every search call.
pub(crate) fn base_query(vtex: &Vtex) -> Vec<(String, String)> {
    vec![("sc".to_string(), vtex.sales_channel.clone())]
}
