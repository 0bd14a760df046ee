//! Legacy URL resolution: storefront paths → page types → `map`/`term`
//! search arguments, plus the breadcrumb and SEO they imply.

use commerce_apps_core::{ListItem, Seo, capitalize, slugify};
use futures::future::try_join_all;
use url::Url;

use super::Vtex;
use super::types::PageType;
use crate::client::{ClientError, RestResponse, STALE};
use crate::urls::with_path;

/// Legacy search `map` parameter for a page type; `None` for page types that
/// do not narrow a search.
#[must_use]
pub fn map_param(page_type: &str) -> Option<&'static str> {
    match page_type {
        "Brand" => Some("b"),
        "Category" | "Department" | "SubCategory" => Some("c"),
        "Collection" | "Cluster" => Some("productClusterIds"),
        "Search" | "FullText" => Some("ft"),
        "Product" => Some("p"),
        _ => None,
    }
}

/// Non-empty `/`-separated segments.
#[must_use]
pub fn segments_from_term(term: &str) -> Vec<&str> {
    term.split('/').filter(|s| !s.is_empty()).collect()
}

/// Resolve every prefix of `term` (`a`, `a/b`, ...) to its page type,
/// concurrently, keeping those with a map param in path order.
///
/// # Errors
///
/// Fails with the first page-type lookup that fails.
pub async fn page_types_from_pathname(vtex: &Vtex, term: &str) -> Result<Vec<PageType>, ClientError> {
    let segments = segments_from_term(term);
    let lookups = (1..=segments.len()).map(|n| {
        let prefix = segments.iter().take(n).copied().collect::<Vec<_>>().join("/");
        async move {
            let response: RestResponse<PageType> = vtex
                .api
                .get(
                    &format!("/api/catalog_system/pub/portal/pagetype/{prefix}"),
                    &[],
                    STALE,
                )
                .await?;
            Ok::<_, ClientError>(response.body)
        }
    });

    let results = try_join_all(lookups).await?;
    Ok(results
        .into_iter()
        .filter(|page| map_param(&page.page_type).is_some())
        .collect())
}

/// `(map, term)` for a resolved path: the i-th path segment of the i-th page
/// type's url, and the page types' map params.
#[must_use]
pub fn get_map_and_term(page_types: &[PageType]) -> (String, String) {
    let term = page_types
        .iter()
        .enumerate()
        .filter_map(|(index, page)| {
            let url = Url::parse(&format!("http://{}", page.url.as_deref()?)).ok()?;
            segments_from_term(url.path())
                .get(index)
                .map(|segment| (*segment).to_string())
        })
        .collect::<Vec<_>>()
        .join("/");

    let map = page_types
        .iter()
        .filter_map(|page| map_param(&page.page_type))
        .collect::<Vec<_>>()
        .join(",");

    (map, term)
}

fn is_category(page: &PageType) -> bool {
    matches!(
        page.page_type.as_str(),
        "Category" | "Department" | "SubCategory"
    )
}

/// Breadcrumb of the category page types, each linking to the slugs of
/// itself and its ancestors.
#[must_use]
pub fn page_types_to_breadcrumb_list(pages: &[PageType], base: &Url) -> Vec<ListItem> {
    let categories: Vec<_> = pages.iter().filter(|page| is_category(page)).collect();
    let slugs: Vec<_> = categories
        .iter()
        .map(|page| slugify(page.name.as_deref().unwrap_or_default()))
        .collect();

    categories
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let path = slugs.iter().take(index + 1).cloned().collect::<Vec<_>>().join("/");
            ListItem {
                name: page.name.clone(),
                item: Some(with_path(base, &format!("/{path}")).to_string()),
                position: index + 1,
            }
        })
        .collect()
}

/// SEO of the deepest page type. With no page types, a full-text `q` search
/// gets its capitalized query as title and description; anything else has
/// no SEO.
#[must_use]
pub fn page_types_to_seo(pages: &[PageType], url: &Url) -> Option<Seo> {
    let Some(current) = pages.last() else {
        let query = url
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())
            .filter(|query| !query.is_empty())?;
        let text = capitalize(&query);
        return Some(Seo {
            title: text.clone(),
            description: text,
            canonical: url.to_string(),
        });
    };

    let path = current
        .url
        .as_deref()
        .and_then(|u| u.split_once(".vtexcommercestable.com.br"))
        .map_or("", |(_, path)| path);
    let canonical = url
        .join(path)
        .map_or_else(|_| url.to_string(), String::from);

    Some(Seo {
        title: current.title.clone().unwrap_or_default(),
        description: current.meta_tag_description.clone().unwrap_or_default(),
        canonical,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn page(page_type: &str, name: &str, url: &str) -> PageType {
        PageType {
            page_type: page_type.to_string(),
            name: Some(name.to_string()),
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_map_param() {
        assert_eq!(map_param("SubCategory"), Some("c"));
        assert_eq!(map_param("Cluster"), Some("productClusterIds"));
        assert_eq!(map_param("FullText"), Some("ft"));
        assert_eq!(map_param("NotFound"), None);
    }

    #[test]
    fn test_segments_from_term() {
        assert_eq!(segments_from_term("/a//b/"), vec!["a", "b"]);
        assert!(segments_from_term("").is_empty());
    }

    #[test]
    fn test_get_map_and_term() {
        let pages = vec![
            page("Department", "Masculino", "acme.vtexcommercestable.com.br/masculino"),
            page("Category", "Camisas", "acme.vtexcommercestable.com.br/masculino/camisas"),
            page("Brand", "Acme", "acme.vtexcommercestable.com.br/masculino/camisas/acme"),
        ];
        assert_eq!(
            get_map_and_term(&pages),
            ("c,c,b".to_string(), "masculino/camisas/acme".to_string())
        );
        assert_eq!(get_map_and_term(&[]), (String::new(), String::new()));
    }

    #[test]
    fn test_breadcrumb_keeps_only_categories() {
        let pages = vec![
            page("Department", "Moda Íntima", "x/moda-intima"),
            page("Brand", "Acme", "x/acme"),
            page("SubCategory", "Meias Longas", "x/moda-intima/meias"),
        ];
        let base = Url::parse("https://shop.example.com/anything?q=1").unwrap();
        let items = page_types_to_breadcrumb_list(&pages, &base);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item.as_deref(), Some("https://shop.example.com/moda-intima"));
        assert_eq!(
            items[1].item.as_deref(),
            Some("https://shop.example.com/moda-intima/meias-longas")
        );
        assert_eq!(items[1].position, 2);
    }

    #[test]
    fn test_seo_from_full_text_query() {
        let url = Url::parse("https://shop.example.com/s?q=camisa%20azul").unwrap();
        let seo = page_types_to_seo(&[], &url).unwrap();
        assert_eq!(seo.title, "Camisa Azul");
        assert_eq!(seo.description, "Camisa Azul");
        assert_eq!(seo.canonical, url.to_string());

        let plain = Url::parse("https://shop.example.com/s").unwrap();
        assert!(page_types_to_seo(&[], &plain).is_none());
    }

    #[test]
    fn test_seo_empty_query_is_none() {
        let url = Url::parse("https://shop.example.com/s?q=").unwrap();
        assert!(page_types_to_seo(&[], &url).is_none());
    }

    #[test]
    fn test_seo_from_last_page_type() {
        let mut last = page(
            "Category",
            "Camisas",
            "acme.vtexcommercestable.com.br/masculino/camisas",
        );
        last.title = Some("Camisas masculinas".to_string());
        last.meta_tag_description = Some("As melhores camisas".to_string());
        let url = Url::parse("https://shop.example.com/masculino/camisas?page=2").unwrap();

        let seo = page_types_to_seo(&[last], &url).unwrap();
        assert_eq!(seo.title, "Camisas masculinas");
        assert_eq!(seo.description, "As melhores camisas");
        assert_eq!(seo.canonical, "https://shop.example.com/masculino/camisas");
    }
}
