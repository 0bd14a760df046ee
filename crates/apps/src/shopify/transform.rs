//! Shopify payloads → catalog schema.

use commerce_apps_core::{
    AggregateOffer, Brand, BreadcrumbList, Filter, FilterRange, FilterRangeValue, FilterToggle,
    FilterToggleValue, ImageObject, ItemAvailability, ListItem, Offer, PriceTypeEnumeration,
    Product, ProductGroup, PropertyValue, QuantitativeValue, UnitPriceSpecification,
    default_image,
};
use serde_json::{Value, json};
use url::Url;

use super::types::{
    FilterType, Image, Product as ShopifyProduct, ProductFilter, ProductVariant, filter_input,
};
use crate::urls::{query_pairs, set_query_pairs, with_path};

/// Query parameters that carry Storefront product filters start with this.
pub const FILTER_PREFIX: &str = "filter.";

/// Cursor params dropped whenever the filter selection changes.
const CURSOR_PARAMS: [&str; 3] = ["after", "before", "page"];

/// Trailing number of a `gid://shopify/Type/123` id.
#[must_use]
pub fn numeric_id(gid: &str) -> &str {
    gid.rsplit('/').next().unwrap_or(gid)
}

/// `/products/{handle}`, with `?skuId=` when a variant is given.
#[must_use]
pub fn product_url(handle: &str, variant: Option<&ProductVariant>, base: &Url) -> Url {
    let mut url = with_path(base, &format!("/products/{handle}"));
    if let Some(variant) = variant {
        url.query_pairs_mut()
            .append_pair("skuId", numeric_id(&variant.id));
    }
    url
}

fn to_image(image: &Image) -> ImageObject {
    ImageObject {
        url: image.url.clone(),
        alternate_name: image.alt_text.clone(),
    }
}

/// Map one variant of `product`. At level 0 the product group lists every
/// variant, mapped at level 1.
#[must_use]
pub fn to_product(
    product: &ShopifyProduct,
    variant: &ProductVariant,
    base: &Url,
    level: u8,
) -> Product {
    let product_id = numeric_id(&variant.id).to_string();

    let mut image: Vec<ImageObject> = variant
        .image
        .iter()
        .chain(product.images.nodes.iter())
        .map(to_image)
        .collect();
    if image.is_empty() {
        image.push(default_image());
    }

    let has_variant = if level == 0 {
        product
            .variants
            .nodes
            .iter()
            .map(|v| to_product(product, v, base, level + 1))
            .collect()
    } else {
        Vec::new()
    };

    let price = variant.price.amount;
    let price_specification = variant
        .compare_at_price
        .iter()
        .map(|list| UnitPriceSpecification::new(PriceTypeEnumeration::ListPrice, list.amount))
        .chain(std::iter::once(UnitPriceSpecification::new(
            PriceTypeEnumeration::SalePrice,
            price,
        )))
        .collect();

    Product {
        sku: variant
            .sku
            .clone()
            .filter(|sku| !sku.is_empty())
            .unwrap_or_else(|| product_id.clone()),
        name: Some(variant.title.clone()),
        description: Some(product.description.clone()),
        url: Some(product_url(&product.handle, Some(variant), base).to_string()),
        gtin: variant.barcode.clone().filter(|b| !b.is_empty()),
        category: product.product_type.clone().filter(|t| !t.is_empty()),
        in_product_group_with_id: Some(numeric_id(&product.id).to_string()),
        release_date: product.created_at.clone(),
        image,
        brand: product.vendor.clone().map(|name| Brand {
            name,
            url: None,
            logo: None,
        }),
        is_variant_of: Some(ProductGroup {
            product_group_id: numeric_id(&product.id).to_string(),
            url: Some(product_url(&product.handle, None, base).to_string()),
            name: Some(product.title.clone()),
            model: None,
            has_variant,
            additional_property: product
                .tags
                .iter()
                .map(|tag| PropertyValue::new(Some("TAG".to_string()), Some(tag.clone()), "TAG"))
                .collect(),
        }),
        is_similar_to: Vec::new(),
        additional_property: variant
            .selected_options
            .iter()
            .map(|option| {
                PropertyValue::new(
                    Some(option.name.clone()),
                    Some(option.value.clone()),
                    "SPECIFICATION",
                )
            })
            .collect(),
        offers: Some(AggregateOffer {
            high_price: variant.compare_at_price.as_ref().map_or(price, |p| p.amount),
            low_price: price,
            offer_count: 1,
            price_currency: Some(variant.price.currency_code.clone()),
            offers: vec![Offer {
                seller: None,
                price,
                price_specification,
                availability: ItemAvailability::from_available(variant.available_for_sale),
                inventory_level: QuantitativeValue {
                    value: variant.quantity_available,
                },
                item_condition: None,
                price_valid_until: None,
            }],
        }),
        product_id,
    }
}

/// Single crumb: the product group, linking to the variant.
#[must_use]
pub fn to_breadcrumb_list(product: &Product) -> BreadcrumbList {
    let group = product.is_variant_of.as_ref();
    BreadcrumbList::new(vec![ListItem {
        name: group.and_then(|g| g.name.clone()).or_else(|| product.name.clone()),
        item: product.url.clone(),
        position: 1,
    }])
}

/// Query-param value selecting a filter value: the scalar inside its JSON
/// input (`{"productVendor":"Acme"}` → `Acme`, `{"available":true}` → `1`).
fn param_value(input: &Value) -> Option<String> {
    let (_, inner) = input.as_object()?.iter().next()?;
    match inner {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Object(map) => map.get("value").and_then(Value::as_str).map(String::from),
        _ => None,
    }
}

fn price_bounds(filter: &ProductFilter) -> FilterRangeValue {
    let price = filter.values.first().map(filter_input).unwrap_or_default();
    let bound = |key: &str| price["price"][key].as_f64().unwrap_or_default();
    FilterRangeValue {
        min: bound("min"),
        max: bound("max"),
    }
}

/// Storefront filters → catalog filters. Each toggle URL adds or removes
/// `{filter id}={value}` and resets pagination.
#[must_use]
pub fn to_filters(filters: &[ProductFilter], base: &Url) -> Vec<Filter> {
    let current = query_pairs(base);

    filters
        .iter()
        .map(|filter| {
            if filter.kind == FilterType::PriceRange {
                return Filter::FilterRange(FilterRange {
                    key: filter.id.clone(),
                    label: filter.label.clone(),
                    values: price_bounds(filter),
                });
            }

            let values = filter
                .values
                .iter()
                .map(|value| {
                    let param = param_value(&filter_input(value)).unwrap_or_else(|| value.label.clone());
                    let selected = current
                        .iter()
                        .any(|(k, v)| *k == filter.id && *v == param);

                    let mut pairs: Vec<_> = current
                        .iter()
                        .filter(|(k, v)| {
                            !CURSOR_PARAMS.contains(&k.as_str())
                                && !(selected && *k == filter.id && *v == param)
                        })
                        .cloned()
                        .collect();
                    if !selected {
                        pairs.push((filter.id.clone(), param.clone()));
                    }
                    let mut url = base.clone();
                    set_query_pairs(&mut url, &pairs);

                    FilterToggleValue {
                        value: param,
                        label: value.label.clone(),
                        quantity: value.count,
                        selected,
                        url: url.to_string(),
                    }
                })
                .collect();

            Filter::FilterToggle(FilterToggle {
                key: filter.id.clone(),
                label: filter.label.clone(),
                quantity: 0,
                values,
            })
        })
        .collect()
}

/// `filter.*` query params → Storefront `ProductFilter` inputs.
#[must_use]
pub fn filters_from_url(url: &Url) -> Vec<Value> {
    let mut filters = Vec::new();
    let mut price = serde_json::Map::new();

    for (key, value) in url.query_pairs() {
        let Some(name) = key.strip_prefix(FILTER_PREFIX) else {
            continue;
        };
        match name {
            "v.availability" => filters.push(json!({ "available": value == "1" })),
            "p.vendor" => filters.push(json!({ "productVendor": value })),
            "p.product_type" => filters.push(json!({ "productType": value })),
            "p.tag" => filters.push(json!({ "tag": value })),
            "v.price.gte" | "v.price.lte" => {
                if let Ok(bound) = value.parse::<f64>() {
                    let side = if name.ends_with("gte") { "min" } else { "max" };
                    price.insert(side.to_string(), json!(bound));
                }
            }
            _ => {
                if let Some(option) = name.strip_prefix("v.option.") {
                    filters.push(json!({
                        "variantOption": { "name": option, "value": value }
                    }));
                }
            }
        }
    }

    if !price.is_empty() {
        filters.push(json!({ "price": price }));
    }
    filters
}
