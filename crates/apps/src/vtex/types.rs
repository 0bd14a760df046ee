//! VTEX legacy Catalog System payloads (PascalCase and camelCase mixed, as
//! VTEX sends them).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

// =============================================================================
// Page types
// =============================================================================

/// `GET /api/catalog_system/pub/portal/pagetype/{term}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageType {
    pub id: Option<String>,
    pub page_type: String,
    pub name: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub meta_tag_description: Option<String>,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Installment {
    pub value: Decimal,
    pub interest_rate: Option<Decimal>,
    pub total_value_plus_interest_rate: Decimal,
    pub number_of_installments: i64,
    pub payment_system_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommertialOffer {
    pub price: Decimal,
    pub list_price: Decimal,
    #[serde(default)]
    pub available_quantity: i64,
    pub price_valid_until: Option<String>,
    #[serde(default)]
    pub installments: Vec<Installment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub seller_id: String,
    pub seller_name: Option<String>,
    #[serde(default)]
    pub seller_default: bool,
    pub commertial_offer: CommertialOffer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuImage {
    pub image_url: String,
    pub image_label: Option<String>,
    pub image_text: Option<String>,
}

/// A SKU of a legacy product. Variation values sit under keys named after
/// each variation (`"Cor": ["Azul"]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: String,
    pub name: String,
    pub name_complete: Option<String>,
    pub ean: Option<String>,
    #[serde(default)]
    pub images: Vec<SkuImage>,
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Values of a variation or specification stored under its own key.
    #[must_use]
    pub fn values_of(&self, name: &str) -> Vec<String> {
        string_values(&self.extra, name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProduct {
    pub product_id: String,
    pub product_name: String,
    pub brand: Option<String>,
    pub link_text: String,
    pub description: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub product_title: Option<String>,
    pub meta_tag_description: Option<String>,
    #[serde(default)]
    pub all_specifications: Vec<String>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LegacyProduct {
    #[must_use]
    pub fn values_of(&self, name: &str) -> Vec<String> {
        string_values(&self.extra, name)
    }
}

fn string_values(map: &Map<String, Value>, name: &str) -> Vec<String> {
    map.get(name)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str().map(String::from))
        .collect()
}

// =============================================================================
// Facets
// =============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyFacet {
    #[serde(default)]
    pub quantity: i64,
    pub name: String,
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    /// Price ranges carry their value here.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub children: Vec<LegacyFacet>,
}

/// `GET /api/catalog_system/pub/facets/search/{term}`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct LegacyFacets {
    #[serde(default)]
    pub departments: Vec<LegacyFacet>,
    #[serde(default)]
    pub brands: Vec<LegacyFacet>,
    #[serde(default)]
    pub specification_filters: BTreeMap<String, Vec<LegacyFacet>>,
    #[serde(default)]
    pub categories_trees: Vec<LegacyFacet>,
    #[serde(default)]
    pub price_ranges: Vec<LegacyFacet>,
}
