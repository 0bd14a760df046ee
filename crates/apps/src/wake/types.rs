//! Wake Storefront GraphQL and REST payloads.
//!
//! Wake returns sparse objects; nearly everything is optional.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Storefront GraphQL
// =============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductFragment {
    pub main_variant: Option<bool>,
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub product_variant_id: Option<i64>,
    pub variant_name: Option<String>,
    pub alias: Option<String>,
    pub sku: Option<String>,
    pub ean: Option<String>,
    pub available: Option<bool>,
    pub stock: Option<i64>,
    pub condition: Option<String>,
    #[serde(default)]
    pub attributes: Option<Vec<Option<Attribute>>>,
    #[serde(default)]
    pub informations: Option<Vec<Option<Information>>>,
    #[serde(default)]
    pub images: Option<Vec<Option<Image>>>,
    pub prices: Option<Prices>,
    pub product_brand: Option<ProductBrand>,
    pub seller: Option<Seller>,
    /// Only present on single products.
    #[serde(default)]
    pub product_categories: Option<Vec<Option<ProductCategory>>>,
    #[serde(default)]
    pub seo: Option<Vec<Option<SeoEntry>>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Attribute {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Information {
    pub title: Option<String>,
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Prices {
    pub list_price: Option<Decimal>,
    pub price: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
    pub discounted: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductBrand {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub logo_url: Option<String>,
    pub full_url_logo: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Seller {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProductCategory {
    pub id: Option<i64>,
    #[serde(default)]
    pub main: bool,
    pub name: Option<String>,
    pub url: Option<String>,
    /// Category names joined with `" > "`.
    pub hierarchy: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeoEntry {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetProductData {
    pub product: Option<ProductFragment>,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: Option<Search>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    pub aggregations: Option<Aggregations>,
    #[serde(default)]
    pub breadcrumbs: Option<Vec<Option<SearchBreadcrumb>>>,
    pub page_size: Option<i64>,
    pub redirect_url: Option<String>,
    pub products: Option<ProductConnection>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Aggregations {
    #[serde(default)]
    pub filters: Option<Vec<Option<SearchFilter>>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchFilter {
    pub field: Option<String>,
    pub origin: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<Option<SearchFilterValue>>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchFilterValue {
    pub name: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchBreadcrumb {
    pub link: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    #[serde(default)]
    pub nodes: Option<Vec<Option<ProductFragment>>>,
    pub page_info: Option<PageInfo>,
    pub total_count: Option<i64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
}

/// `{field, values}` product filter sent with a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFilterInput {
    pub field: String,
    pub values: Vec<String>,
}

// =============================================================================
// Checkout
// =============================================================================

/// A Wake checkout. Every field is optional so an empty checkout serializes
/// as `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub shipping_fee: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtotal: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Option<CheckoutProduct>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutProduct {
    pub product_id: i64,
    pub product_variant_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub list_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub ajusted_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutData {
    pub checkout: Option<Checkout>,
}

/// `CheckoutProductInput`: the checkout and the items to add or remove.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutProductInput {
    pub id: String,
    pub products: Vec<CheckoutProductItem>,
}

/// One cart line as sent to Wake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutProductItem {
    pub product_variant_id: i64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customization: Vec<Customization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub customization_id: i64,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscription_group_id: i64,
    pub recurring_type_id: i64,
}

// =============================================================================
// REST API (`GET /produtos`)
// =============================================================================

/// A product variant as listed by the REST API.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestProduct {
    pub produto_variante_id: i64,
    pub produto_id: i64,
    pub sku: Option<String>,
    pub nome: Option<String>,
    pub nome_produto_pai: Option<String>,
    pub fabricante: Option<String>,
    pub preco_de: Option<Decimal>,
    pub preco_por: Option<Decimal>,
    pub ean: Option<String>,
    pub valido: Option<bool>,
    pub exibir_site: Option<bool>,
    #[serde(default)]
    pub estoque: Vec<RestStock>,
    #[serde(default)]
    pub atributos: Vec<RestAttribute>,
    #[serde(default)]
    pub informacoes: Vec<RestInformation>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestStock {
    #[serde(default)]
    pub estoque_fisico: i64,
    #[serde(default)]
    pub estoque_reservado: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RestAttribute {
    pub nome: Option<String>,
    pub valor: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestInformation {
    pub titulo: Option<String>,
    pub texto: Option<String>,
    pub tipo_informacao: Option<String>,
}
