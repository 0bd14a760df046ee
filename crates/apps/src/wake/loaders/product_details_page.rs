//! Product details page by `{slug}-{id}`.

use commerce_apps_core::{ProductDetailsPage, Seo};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::client::GraphqlRequest;
use crate::context::InvokeContext;
use crate::error::Result;
use crate::wake::Wake;
use crate::wake::fragments::{GET_PRODUCT, SINGLE_PRODUCT};
use crate::wake::transform::{parse_slug, to_breadcrumb_list, to_product};
use crate::wake::types::{GetProductData, ProductFragment};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {
    /// `{slug}-{productId}` path segment.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Fetch one product. A missing slug or unknown product yields `None`.
///
/// # Errors
///
/// 400 for a malformed slug, or the client error of the product query.
#[instrument(skip(wake, ctx))]
pub async fn loader(
    wake: &Wake,
    props: Props,
    ctx: &InvokeContext,
) -> Result<Option<ProductDetailsPage>> {
    let Some(slug) = props.slug.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let parsed = parse_slug(&slug)?;

    let data: GetProductData = wake
        .storefront
        .query(GraphqlRequest::new(
            GET_PRODUCT,
            &[SINGLE_PRODUCT],
            json!({ "productId": parsed.id }),
        ))
        .await?;

    let Some(fragment) = data.product else {
        return Ok(None);
    };

    let product = to_product(&fragment, &ctx.url);
    let breadcrumb_list = to_breadcrumb_list(
        &product,
        fragment.product_categories.as_deref().unwrap_or_default(),
        &ctx.url,
    );
    let seo = to_seo(&fragment, product.is_variant_of.as_ref().and_then(|g| g.url.clone()));

    Ok(Some(ProductDetailsPage {
        breadcrumb_list,
        product,
        seo: Some(seo),
    }))
}

/// Title from the `title` SEO entry (falling back to the product name),
/// description from the `description` meta entry.
fn to_seo(fragment: &ProductFragment, canonical: Option<String>) -> Seo {
    let entries: Vec<_> = fragment.seo.iter().flatten().flatten().collect();

    let title = entries
        .iter()
        .find(|e| e.kind.as_deref().is_some_and(|k| k.eq_ignore_ascii_case("title")))
        .and_then(|e| e.content.clone())
        .or_else(|| fragment.product_name.clone())
        .unwrap_or_default();
    let description = entries
        .iter()
        .find(|e| e.name.as_deref() == Some("description"))
        .and_then(|e| e.content.clone())
        .unwrap_or_default();

    Seo {
        title,
        description,
        canonical: canonical.unwrap_or_default(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seo_entries() {
        let fragment: ProductFragment = serde_json::from_value(json!({
            "productName": "Caneca",
            "seo": [
                {"type": "TITLE", "content": "Caneca | Loja"},
                {"name": "description", "type": "meta", "content": "Uma caneca"},
                null
            ]
        }))
        .unwrap();

        let seo = to_seo(&fragment, Some("https://shop.example.com/produto/caneca-1".to_string()));
        assert_eq!(seo.title, "Caneca | Loja");
        assert_eq!(seo.description, "Uma caneca");
        assert_eq!(seo.canonical, "https://shop.example.com/produto/caneca-1");
    }

    #[test]
    fn test_seo_falls_back_to_name() {
        let fragment = ProductFragment {
            product_name: Some("Caneca".to_string()),
            ..Default::default()
        };
        let seo = to_seo(&fragment, None);
        assert_eq!(seo.title, "Caneca");
        assert_eq!(seo.description, "");
    }
}
