//! Legacy catalog payloads → catalog schema.

use commerce_apps_core::{
    AggregateOffer, Brand, BreadcrumbList, Filter, FilterToggle, FilterToggleValue, ImageObject,
    ItemAvailability, ListItem, Offer, PriceTypeEnumeration, Product, ProductGroup, PropertyValue,
    QuantitativeValue, SortOption, UnitPriceSpecification, default_image, slugify,
};
use url::Url;

use super::legacy::segments_from_term;
use super::types::{Item, LegacyFacet, LegacyFacets, LegacyProduct, Seller};
use crate::urls::{query_pairs, set_query_pairs, with_path};

pub const PRICE_CURRENCY: &str = "BRL";

#[must_use]
pub fn sort_options() -> Vec<SortOption> {
    [
        ("OrderByScoreDESC", "relevance:desc"),
        ("OrderByPriceDESC", "price:desc"),
        ("OrderByPriceASC", "price:asc"),
        ("OrderByTopSaleDESC", "orders:desc"),
        ("OrderByNameDESC", "name:desc"),
        ("OrderByNameASC", "name:asc"),
        ("OrderByReleaseDateDESC", "release:desc"),
        ("OrderByBestDiscountDESC", "discount:desc"),
    ]
    .into_iter()
    .map(|(value, label)| SortOption::new(value, label))
    .collect()
}

/// `/{linkText}/p`, with `?skuId=` when a SKU is given.
#[must_use]
pub fn product_url(link_text: &str, sku_id: Option<&str>, base: &Url) -> Url {
    let mut url = with_path(base, &format!("/{link_text}/p"));
    if let Some(sku_id) = sku_id {
        url.query_pairs_mut().append_pair("skuId", sku_id);
    }
    url
}

fn to_offer(seller: &Seller) -> Offer {
    let offer = &seller.commertial_offer;
    let price_specification = [
        UnitPriceSpecification::new(PriceTypeEnumeration::ListPrice, offer.list_price),
        UnitPriceSpecification::new(PriceTypeEnumeration::SalePrice, offer.price),
    ]
    .into_iter()
    .chain(offer.installments.iter().map(|i| {
        UnitPriceSpecification::installment(
            i.payment_system_name.clone(),
            i.number_of_installments,
            i.value,
            i.total_value_plus_interest_rate,
        )
    }))
    .collect();

    Offer {
        seller: Some(seller.seller_id.clone()),
        price: offer.price,
        price_specification,
        availability: ItemAvailability::from_available(offer.available_quantity > 0),
        inventory_level: QuantitativeValue {
            value: Some(offer.available_quantity),
        },
        item_condition: None,
        price_valid_until: offer.price_valid_until.clone(),
    }
}

/// Map one SKU of `product`. At level 0 the product group lists every SKU,
/// mapped at level 1.
#[must_use]
pub fn to_product(product: &LegacyProduct, sku: &Item, base: &Url, level: u8) -> Product {
    let mut image: Vec<ImageObject> = sku
        .images
        .iter()
        .map(|img| ImageObject {
            url: img.image_url.clone(),
            alternate_name: img.image_text.clone().or_else(|| img.image_label.clone()),
        })
        .collect();
    if image.is_empty() {
        image.push(default_image());
    }

    // In-stock offers first, cheapest first.
    let mut offers: Vec<Offer> = sku.sellers.iter().map(to_offer).collect();
    offers.sort_by(|a, b| {
        (a.availability != ItemAvailability::InStock, a.price)
            .cmp(&(b.availability != ItemAvailability::InStock, b.price))
    });

    let has_variant = if level == 0 {
        product
            .items
            .iter()
            .map(|item| to_product(product, item, base, level + 1))
            .collect()
    } else {
        Vec::new()
    };

    let category = product
        .categories
        .first()
        .map(|path| segments_from_term(path).join(">"));

    Product {
        product_id: sku.item_id.clone(),
        sku: sku.item_id.clone(),
        name: Some(sku.name.clone()),
        description: product.description.clone(),
        url: Some(product_url(&product.link_text, Some(&sku.item_id), base).to_string()),
        gtin: sku.ean.clone().filter(|ean| !ean.is_empty()),
        category,
        in_product_group_with_id: Some(product.product_id.clone()),
        release_date: product.release_date.clone(),
        image,
        brand: product.brand.clone().map(|name| Brand {
            name,
            url: None,
            logo: None,
        }),
        is_variant_of: Some(ProductGroup {
            product_group_id: product.product_id.clone(),
            url: Some(product_url(&product.link_text, None, base).to_string()),
            name: Some(product.product_name.clone()),
            model: None,
            has_variant,
            additional_property: product
                .all_specifications
                .iter()
                .flat_map(|name| {
                    product.values_of(name).into_iter().map(move |value| {
                        PropertyValue::new(Some(name.clone()), Some(value), "SPECIFICATION")
                    })
                })
                .collect(),
        }),
        is_similar_to: Vec::new(),
        additional_property: sku
            .variations
            .iter()
            .flat_map(|name| {
                sku.values_of(name).into_iter().map(move |value| {
                    PropertyValue::new(Some(name.clone()), Some(value), "SPECIFICATION")
                })
            })
            .collect(),
        offers: AggregateOffer::from_offers(offers, Some(PRICE_CURRENCY.to_string())),
    }
}

/// Crumbs for the product's first category path, then the product itself.
#[must_use]
pub fn to_breadcrumb_list(product: &LegacyProduct, base: &Url) -> BreadcrumbList {
    let names: Vec<&str> = product
        .categories
        .first()
        .map(|path| segments_from_term(path))
        .unwrap_or_default();
    let slugs: Vec<String> = names.iter().map(|name| slugify(name)).collect();

    let mut items: Vec<ListItem> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let path = slugs.iter().take(index + 1).cloned().collect::<Vec<_>>().join("/");
            ListItem {
                name: Some((*name).to_string()),
                item: Some(with_path(base, &format!("/{path}")).to_string()),
                position: index + 1,
            }
        })
        .collect();
    items.push(ListItem {
        name: Some(product.product_name.clone()),
        item: Some(product_url(&product.link_text, None, base).to_string()),
        position: names.len() + 1,
    });

    BreadcrumbList::new(items)
}

/// Facets → toggles. A facet is selected when its map and value both appear
/// in the current `map` / `term`; selecting appends `/{value}` to the path
/// and `,{map}` to the map param, deselecting removes them.
#[must_use]
pub fn legacy_facets_to_filters(
    facets: &LegacyFacets,
    url: &Url,
    map: &str,
    term: &str,
) -> Vec<Filter> {
    let maps: Vec<&str> = map.split(',').filter(|m| !m.is_empty()).collect();
    let segments: Vec<&str> = segments_from_term(term).into_iter().take(maps.len()).collect();

    let toggle = |name: &str, values: &[LegacyFacet]| {
        let values = values
            .iter()
            .filter_map(|facet| {
                let value = facet.value.clone().or_else(|| facet.slug.clone())?;
                let facet_map = facet.map.clone().unwrap_or_else(|| "priceFrom".to_string());
                let position = maps
                    .iter()
                    .zip(segments.iter())
                    .position(|(m, s)| *m == facet_map && s.eq_ignore_ascii_case(&value));

                let (new_maps, new_segments): (Vec<String>, Vec<String>) = match position {
                    Some(index) => maps
                        .iter()
                        .zip(segments.iter())
                        .enumerate()
                        .filter(|(i, _)| *i != index)
                        .map(|(_, (m, s))| ((*m).to_string(), (*s).to_string()))
                        .unzip(),
                    None => maps
                        .iter()
                        .zip(segments.iter())
                        .map(|(m, s)| ((*m).to_string(), (*s).to_string()))
                        .chain(std::iter::once((facet_map, value.clone())))
                        .unzip(),
                };

                let mut link = with_path(url, &format!("/{}", new_segments.join("/")));
                let mut pairs: Vec<_> = query_pairs(url)
                    .into_iter()
                    .filter(|(k, _)| k != "map" && k != "page")
                    .collect();
                if !new_maps.is_empty() {
                    pairs.push(("map".to_string(), new_maps.join(",")));
                }
                set_query_pairs(&mut link, &pairs);

                Some(FilterToggleValue {
                    value,
                    label: facet.name.clone(),
                    quantity: facet.quantity,
                    selected: position.is_some(),
                    url: link.to_string(),
                })
            })
            .collect();

        Filter::FilterToggle(FilterToggle {
            key: name.to_string(),
            label: name.to_string(),
            quantity: 0,
            values,
        })
    };

    let mut categories = Vec::new();
    flatten_tree(&facets.categories_trees, &mut categories);

    let mut filters = vec![
        toggle("Departments", facets.departments.as_slice()),
        toggle("Categories", categories.as_slice()),
        toggle("Brands", facets.brands.as_slice()),
        toggle("PriceRanges", facets.price_ranges.as_slice()),
    ];
    filters.extend(
        facets
            .specification_filters
            .iter()
            .map(|(name, values)| toggle(name.as_str(), values.as_slice())),
    );
    filters
}

fn flatten_tree(tree: &[LegacyFacet], out: &mut Vec<LegacyFacet>) {
    for node in tree {
        out.push(LegacyFacet {
            children: Vec::new(),
            ..node.clone()
        });
        flatten_tree(&node.children, out);
    }
}
