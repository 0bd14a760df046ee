//! Wake payloads → catalog schema.

use axum::http::StatusCode;
use commerce_apps_core::{
    AggregateOffer, Brand, BreadcrumbList, Filter, FilterToggle, FilterToggleValue, ImageObject,
    ItemAvailability, ListItem, Offer, PriceTypeEnumeration, Product, ProductGroup, PropertyValue,
    QuantitativeValue, UnitPriceSpecification, default_image, slugify,
};
use rust_decimal::Decimal;
use url::Url;

use super::types::{
    Aggregations, ProductCategory, ProductFilterInput, ProductFragment, RestProduct,
};
use crate::error::AppError;
use crate::urls::{query_pairs, set_query_pairs, with_path};

/// Query parameter carrying `field:value` search filters.
pub const FILTER_PARAM: &str = "filtro";

/// Extra field groups requested from `GET /produtos`.
pub const CAMPOS_ADICIONAIS: [&str; 5] =
    ["Atacado", "Estoque", "Atributo", "Informacao", "TabelaPreco"];

const DESCRIPTION_INFORMATION: &str = "Descrição";

/// A `{slug}-{id}` product path segment, split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSlug {
    pub slug: String,
    pub id: i64,
}

/// Split a `{slug}-{id}` segment.
///
/// # Errors
///
/// Returns a 400 error when the last dash-separated part is not a non-zero
/// number.
pub fn parse_slug(slug: &str) -> Result<ParsedSlug, AppError> {
    let (head, last) = slug.rsplit_once('-').unwrap_or(("", slug));

    match last.trim().parse::<i64>() {
        Ok(id) if id != 0 => Ok(ParsedSlug {
            slug: head.to_string(),
            id,
        }),
        _ => Err(AppError::http(
            StatusCode::BAD_REQUEST,
            "Malformed slug. Expecting {slug}-{id} format",
        )),
    }
}

/// `/produto/{slugify(name)}-{product_id}` on the page origin.
#[must_use]
pub fn get_product_url(product_name: Option<&str>, product_id: i64, base: &Url) -> Url {
    let slug = slugify(product_name.unwrap_or_default());
    with_path(base, &format!("/produto/{slug}-{product_id}"))
}

/// Product URL pinned to one variant with `skuId`.
#[must_use]
pub fn get_variant_url(
    product_name: Option<&str>,
    product_id: i64,
    product_variant_id: i64,
    base: &Url,
) -> Url {
    let mut url = get_product_url(product_name, product_id, base);
    url.query_pairs_mut()
        .append_pair("skuId", &product_variant_id.to_string());
    url
}

/// `filtro=field:value` params of the page, grouped by field in first-seen
/// order.
#[must_use]
pub fn filters_from_url(url: &Url) -> Vec<ProductFilterInput> {
    let mut filters: Vec<ProductFilterInput> = Vec::new();

    for (key, value) in url.query_pairs() {
        if key != FILTER_PARAM {
            continue;
        }
        let Some((field, value)) = value.split_once(':') else {
            continue;
        };
        match filters.iter_mut().find(|f| f.field == field) {
            Some(filter) => filter.values.push(value.to_string()),
            None => filters.push(ProductFilterInput {
                field: field.to_string(),
                values: vec![value.to_string()],
            }),
        }
    }

    filters
}

/// Search aggregations → toggle filters whose URLs add or remove a
/// `filtro={field}:{name}` param.
#[must_use]
pub fn to_filters(aggregations: Option<&Aggregations>, base: &Url) -> Vec<Filter> {
    let Some(filters) = aggregations.and_then(|a| a.filters.as_ref()) else {
        return vec![];
    };
    let current = query_pairs(base);

    filters
        .iter()
        .flatten()
        .map(|filter| {
            let field = filter.field.clone().unwrap_or_default();

            let values = filter
                .values
                .iter()
                .flatten()
                .flatten()
                .map(|filter_value| {
                    let name = filter_value.name.clone().unwrap_or_default();
                    let param = format!("{field}:{name}");
                    let selected = current
                        .iter()
                        .any(|(key, value)| key == FILTER_PARAM && *value == param);

                    let mut url = base.clone();
                    if selected {
                        let kept: Vec<_> = current
                            .iter()
                            .filter(|(key, value)| key != FILTER_PARAM || *value != param)
                            .cloned()
                            .collect();
                        set_query_pairs(&mut url, &kept);
                    } else {
                        url.query_pairs_mut().append_pair(FILTER_PARAM, &param);
                    }

                    FilterToggleValue {
                        value: name.clone(),
                        label: name,
                        quantity: filter_value.quantity.unwrap_or_default(),
                        selected,
                        url: url.to_string(),
                    }
                })
                .collect();

            Filter::FilterToggle(FilterToggle {
                key: filter.origin.clone().unwrap_or_default(),
                label: field,
                quantity: 0,
                values,
            })
        })
        .collect()
}

/// Breadcrumb from the product's main category, ending with the product.
///
/// The category URL segments are paired with its `" > "`-separated hierarchy
/// names; when their counts differ the trail is empty.
#[must_use]
pub fn to_breadcrumb_list(
    product: &Product,
    categories: &[Option<ProductCategory>],
    base: &Url,
) -> BreadcrumbList {
    let category = categories.iter().flatten().find(|c| c.main);
    let segments: Vec<&str> = category
        .and_then(|c| c.url.as_deref())
        .map(|u| u.split('/').collect())
        .unwrap_or_default();
    let names: Vec<&str> = category
        .and_then(|c| c.hierarchy.as_deref())
        .map(|h| h.split(" > ").collect())
        .unwrap_or_default();

    if segments.len() != names.len() {
        return BreadcrumbList::new(vec![]);
    }

    let mut items: Vec<ListItem> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let path = segments.iter().take(i + 1).copied().collect::<Vec<_>>().join("/");
            ListItem {
                name: Some((*name).to_string()),
                item: Some(with_path(base, &format!("/{path}")).to_string()),
                position: i + 1,
            }
        })
        .collect();

    items.push(ListItem {
        name: product.is_variant_of.as_ref().and_then(|g| g.name.clone()),
        item: product.is_variant_of.as_ref().and_then(|g| g.url.clone()),
        position: segments.len() + 1,
    });

    BreadcrumbList::new(items)
}

/// List price (when present) then sale price.
fn price_specification(
    list_price: Option<Decimal>,
    price: Option<Decimal>,
) -> Vec<UnitPriceSpecification> {
    [
        list_price.map(|p| UnitPriceSpecification::new(PriceTypeEnumeration::ListPrice, p)),
        price.map(|p| UnitPriceSpecification::new(PriceTypeEnumeration::SalePrice, p)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// One-offer aggregate; no price means no offers.
fn single_offer(
    price: Option<Decimal>,
    price_specification: Vec<UnitPriceSpecification>,
    seller: Option<String>,
    available: bool,
    stock: Option<i64>,
) -> Option<AggregateOffer> {
    let price = price?;
    Some(AggregateOffer {
        high_price: price,
        low_price: price,
        offer_count: 1,
        price_currency: None,
        offers: vec![Offer {
            seller,
            price,
            price_specification,
            availability: ItemAvailability::from_available(available),
            inventory_level: QuantitativeValue { value: stock },
            item_condition: None,
            price_valid_until: None,
        }],
    })
}

/// Map a Storefront product (search node or single product) to a [`Product`].
#[must_use]
pub fn to_product(variant: &ProductFragment, base: &Url) -> Product {
    let product_id = variant.product_id.unwrap_or_default();
    let variant_id = variant.product_variant_id.unwrap_or_default();
    let product_name = variant.product_name.as_deref();
    let product_id_str = variant_id.to_string();

    let image: Vec<ImageObject> = variant
        .images
        .iter()
        .flatten()
        .flatten()
        .map(|image| ImageObject {
            url: image.url.clone().unwrap_or_default(),
            alternate_name: Some(image.file_name.clone().unwrap_or_default()),
        })
        .collect();

    let informations = variant.informations.iter().flatten().flatten();
    let mut additional_property: Vec<PropertyValue> = informations
        .clone()
        .map(|info| PropertyValue::new(info.title.clone(), info.value.clone(), "INFORMATION"))
        .collect();
    additional_property.extend(
        variant
            .attributes
            .iter()
            .flatten()
            .flatten()
            .map(|attr| PropertyValue::new(attr.name.clone(), attr.value.clone(), "SPECIFICATION")),
    );

    let prices = variant.prices.as_ref();
    let price = prices.and_then(|p| p.price);

    Product {
        url: Some(get_variant_url(product_name, product_id, variant_id, base).to_string()),
        gtin: variant.ean.clone(),
        sku: variant.sku.clone().unwrap_or_else(|| product_id_str.clone()),
        description: informations
            .clone()
            .find(|info| info.kind.as_deref() == Some(DESCRIPTION_INFORMATION))
            .and_then(|info| info.value.clone()),
        product_id: product_id_str,
        name: variant.variant_name.clone(),
        in_product_group_with_id: Some(product_id.to_string()),
        image: if image.is_empty() {
            vec![default_image()]
        } else {
            image
        },
        brand: variant.product_brand.as_ref().map(|brand| Brand {
            name: brand.name.clone().unwrap_or_default(),
            url: brand.logo_url.clone().or_else(|| brand.full_url_logo.clone()),
            logo: None,
        }),
        is_variant_of: Some(ProductGroup {
            product_group_id: product_id.to_string(),
            url: Some(get_product_url(product_name, product_id, base).to_string()),
            name: variant.product_name.clone(),
            ..Default::default()
        }),
        additional_property,
        offers: single_offer(
            price,
            price_specification(prices.and_then(|p| p.list_price), price),
            variant.seller.as_ref().and_then(|s| s.name.clone()),
            variant.available.unwrap_or_default(),
            variant.stock,
        ),
        ..Default::default()
    }
}

/// Map a REST `/produtos` variant to a [`Product`].
///
/// The REST listing carries no images, so the placeholder is used.
#[must_use]
pub fn rest_to_product(variant: &RestProduct, base: &Url) -> Product {
    let group_name = variant.nome_produto_pai.as_deref().or(variant.nome.as_deref());
    let stock: i64 = variant
        .estoque
        .iter()
        .map(|s| (s.estoque_fisico - s.estoque_reservado).max(0))
        .sum();
    let available = variant.valido.unwrap_or(true) && variant.exibir_site.unwrap_or(true) && stock > 0;
    let product_id = variant.produto_variante_id.to_string();

    let mut additional_property: Vec<PropertyValue> = variant
        .informacoes
        .iter()
        .map(|info| PropertyValue::new(info.titulo.clone(), info.texto.clone(), "INFORMATION"))
        .collect();
    additional_property.extend(
        variant
            .atributos
            .iter()
            .map(|attr| PropertyValue::new(attr.nome.clone(), attr.valor.clone(), "SPECIFICATION")),
    );

    Product {
        url: Some(
            get_variant_url(group_name, variant.produto_id, variant.produto_variante_id, base)
                .to_string(),
        ),
        gtin: variant.ean.clone(),
        sku: variant.sku.clone().unwrap_or_else(|| product_id.clone()),
        description: variant
            .informacoes
            .iter()
            .find(|info| info.tipo_informacao.as_deref() == Some(DESCRIPTION_INFORMATION))
            .and_then(|info| info.texto.clone()),
        product_id,
        name: variant.nome.clone(),
        in_product_group_with_id: Some(variant.produto_id.to_string()),
        image: vec![default_image()],
        brand: variant.fabricante.clone().map(|name| Brand {
            name,
            url: None,
            logo: None,
        }),
        is_variant_of: Some(ProductGroup {
            product_group_id: variant.produto_id.to_string(),
            url: Some(get_product_url(group_name, variant.produto_id, base).to_string()),
            name: group_name.map(str::to_string),
            ..Default::default()
        }),
        additional_property,
        offers: single_offer(
            variant.preco_por,
            price_specification(variant.preco_de, variant.preco_por),
            None,
            available,
            Some(stock),
        ),
        ..Default::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn base() -> Url {
        Url::parse("https://shop.example.com/camisetas?busca=azul").unwrap()
    }

    fn fragment() -> ProductFragment {
        serde_json::from_value(json!({
            "productId": 120,
            "productVariantId": 345,
            "productName": "Camiseta Básica",
            "variantName": "Camiseta Básica Azul M",
            "sku": "CB-AZ-M",
            "ean": "7890000000001",
            "available": true,
            "stock": 8,
            "images": [{"url": "https://cdn.example.com/cb.jpg", "fileName": "cb.jpg"}],
            "informations": [
                {"title": "Descrição", "value": "Algodão", "type": "Descrição"},
                {"title": "Cuidados", "value": "Lavar à mão", "type": "Outros"}
            ],
            "attributes": [{"name": "Cor", "value": "Azul"}],
            "prices": {"listPrice": 99.9, "price": 79.9},
            "productBrand": {"name": "Acme", "logoUrl": null, "fullUrlLogo": "https://cdn.example.com/acme.png"},
            "seller": {"name": "Acme Store"}
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_slug() {
        assert_eq!(
            parse_slug("camiseta-basica-120").unwrap(),
            ParsedSlug {
                slug: "camiseta-basica".to_string(),
                id: 120
            }
        );
        assert_eq!(parse_slug("120").unwrap().id, 120);
    }

    #[test]
    fn test_parse_slug_malformed() {
        for slug in ["camiseta-basica", "camiseta-0", "", "camiseta-"] {
            let err = parse_slug(slug).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{slug}");
            assert_eq!(err.to_string(), "Malformed slug. Expecting {slug}-{id} format");
        }
    }

    #[test]
    fn test_product_and_variant_urls() {
        assert_eq!(
            get_product_url(Some("Tênis Corrida"), 9, &base()).as_str(),
            "https://shop.example.com/produto/tenis-corrida-9"
        );
        assert_eq!(
            get_variant_url(Some("Tênis Corrida"), 9, 31, &base()).as_str(),
            "https://shop.example.com/produto/tenis-corrida-9?skuId=31"
        );
    }

    #[test]
    fn test_to_product_maps_offer_prices() {
        let product = to_product(&fragment(), &base());

        assert_eq!(product.product_id, "345");
        assert_eq!(product.sku, "CB-AZ-M");
        assert_eq!(product.in_product_group_with_id.as_deref(), Some("120"));
        assert_eq!(
            product.url.as_deref(),
            Some("https://shop.example.com/produto/camiseta-basica-120?skuId=345")
        );
        assert_eq!(product.description.as_deref(), Some("Algodão"));

        let offers = product.offers.unwrap();
        assert_eq!(offers.offer_count, 1);
        assert_eq!(offers.high_price, offers.low_price);
        let offer = &offers.offers[0];
        assert_eq!(offer.seller.as_deref(), Some("Acme Store"));
        assert_eq!(offer.availability, ItemAvailability::InStock);
        assert_eq!(offer.inventory_level.value, Some(8));
        assert_eq!(offer.price_specification.len(), 2);
        assert_eq!(offer.price_specification[0].price_type, PriceTypeEnumeration::ListPrice);
        assert_eq!(offer.price_of(PriceTypeEnumeration::ListPrice), Some("99.9".parse().unwrap()));
        assert_eq!(offer.price_of(PriceTypeEnumeration::SalePrice), Some("79.9".parse().unwrap()));

        let value = serde_json::to_value(&offer.price_specification).unwrap();
        assert_eq!(value[0]["priceType"], "https://schema.org/ListPrice");
        assert_eq!(value[1]["priceType"], "https://schema.org/SalePrice");
    }

    #[test]
    fn test_to_product_properties_and_brand() {
        let product = to_product(&fragment(), &base());

        let refs: Vec<_> = product
            .additional_property
            .iter()
            .map(|p| p.value_reference.as_deref().unwrap())
            .collect();
        assert_eq!(refs, vec!["INFORMATION", "INFORMATION", "SPECIFICATION"]);

        let brand = product.brand.unwrap();
        assert_eq!(brand.name, "Acme");
        assert_eq!(brand.url.as_deref(), Some("https://cdn.example.com/acme.png"));

        let group = product.is_variant_of.unwrap();
        assert_eq!(group.product_group_id, "120");
        assert_eq!(
            group.url.as_deref(),
            Some("https://shop.example.com/produto/camiseta-basica-120")
        );
    }

    #[test]
    fn test_to_product_without_images_or_price() {
        let mut variant = fragment();
        variant.images = Some(vec![]);
        variant.prices = None;
        variant.available = Some(false);

        let product = to_product(&variant, &base());
        assert_eq!(product.image, vec![default_image()]);
        assert!(product.offers.is_none());
    }

    #[test]
    fn test_breadcrumb_from_main_category() {
        let product = to_product(&fragment(), &base());
        let categories = vec![
            Some(ProductCategory {
                main: false,
                url: Some("outros".to_string()),
                hierarchy: Some("Outros".to_string()),
                ..Default::default()
            }),
            Some(ProductCategory {
                main: true,
                url: Some("roupas/camisetas".to_string()),
                hierarchy: Some("Roupas > Camisetas".to_string()),
                ..Default::default()
            }),
        ];

        let list = to_breadcrumb_list(&product, &categories, &base());
        assert_eq!(list.number_of_items, 3);
        assert_eq!(list.item_list_element[0].name.as_deref(), Some("Roupas"));
        assert_eq!(
            list.item_list_element[1].item.as_deref(),
            Some("https://shop.example.com/roupas/camisetas")
        );
        assert_eq!(list.item_list_element[2].position, 3);
        assert_eq!(
            list.item_list_element[2].name.as_deref(),
            Some("Camiseta Básica")
        );
    }

    #[test]
    fn test_breadcrumb_mismatch_is_empty() {
        let product = to_product(&fragment(), &base());
        let categories = vec![Some(ProductCategory {
            main: true,
            url: Some("roupas/camisetas/basicas".to_string()),
            hierarchy: Some("Roupas > Camisetas".to_string()),
            ..Default::default()
        })];

        let list = to_breadcrumb_list(&product, &categories, &base());
        assert_eq!(list.number_of_items, 0);
    }

    #[test]
    fn test_breadcrumb_without_category_has_only_product() {
        let product = to_product(&fragment(), &base());
        let list = to_breadcrumb_list(&product, &[], &base());
        assert_eq!(list.number_of_items, 1);
        assert_eq!(list.item_list_element[0].position, 1);
    }

    #[test]
    fn test_filters_toggle_params() {
        let aggregations: Aggregations = serde_json::from_value(json!({
            "filters": [{
                "field": "Cor",
                "origin": "ATTRIBUTE",
                "values": [{"name": "Azul", "quantity": 4}, {"name": "Preto", "quantity": 2}]
            }]
        }))
        .unwrap();
        let base = Url::parse("https://shop.example.com/camisetas?busca=x&filtro=Cor%3AAzul").unwrap();

        let filters = to_filters(Some(&aggregations), &base);
        assert_eq!(filters.len(), 1);
        let Filter::FilterToggle(toggle) = &filters[0] else {
            panic!("expected toggle");
        };
        assert_eq!(toggle.key, "ATTRIBUTE");
        assert_eq!(toggle.label, "Cor");

        let azul = &toggle.values[0];
        assert!(azul.selected);
        assert_eq!(azul.quantity, 4);
        assert_eq!(azul.url, "https://shop.example.com/camisetas?busca=x");

        let preto = &toggle.values[1];
        assert!(!preto.selected);
        assert_eq!(
            preto.url,
            "https://shop.example.com/camisetas?busca=x&filtro=Cor%3AAzul&filtro=Cor%3APreto"
        );
    }

    #[test]
    fn test_filters_from_url_groups_fields() {
        let url = Url::parse(
            "https://shop.example.com/s?filtro=Cor:Azul&page=2&filtro=Tamanho:M&filtro=Cor:Preto&filtro=bad",
        )
        .unwrap();
        assert_eq!(
            filters_from_url(&url),
            vec![
                ProductFilterInput {
                    field: "Cor".to_string(),
                    values: vec!["Azul".to_string(), "Preto".to_string()],
                },
                ProductFilterInput {
                    field: "Tamanho".to_string(),
                    values: vec!["M".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_rest_to_product() {
        let variant: RestProduct = serde_json::from_value(json!({
            "produtoVarianteId": 77,
            "produtoId": 12,
            "sku": "SKU-77",
            "nome": "Caneca Preta",
            "nomeProdutoPai": "Caneca",
            "fabricante": "Acme",
            "precoDe": 50,
            "precoPor": 40,
            "valido": true,
            "exibirSite": true,
            "estoque": [{"estoqueFisico": 5, "estoqueReservado": 2}],
            "informacoes": [{"titulo": "Sobre", "texto": "Cerâmica", "tipoInformacao": "Descrição"}]
        }))
        .unwrap();

        let product = rest_to_product(&variant, &base());
        assert_eq!(product.product_id, "77");
        assert_eq!(
            product.url.as_deref(),
            Some("https://shop.example.com/produto/caneca-12?skuId=77")
        );
        assert_eq!(product.description.as_deref(), Some("Cerâmica"));
        assert_eq!(product.image, vec![default_image()]);

        let offer = &product.offers.unwrap().offers[0];
        assert_eq!(offer.availability, ItemAvailability::InStock);
        assert_eq!(offer.inventory_level.value, Some(3));
        assert_eq!(offer.price_of(PriceTypeEnumeration::ListPrice), Some(Decimal::from(50)));
    }
}
