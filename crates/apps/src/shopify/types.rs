//! Shopify Storefront and Admin API payloads.
//!
//! Only the fields the queries in [`super::queries`] select. Cart types are
//! also the output of the cart loader and actions, so they serialize back in
//! the API's own camelCase shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Common
// =============================================================================

/// Monetary amount with currency code. Shopify sends the amount as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: Decimal,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// A `{ nodes: [...] }` connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Result of a mutation aliased to `payload`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub cart: Option<Cart>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayloadData {
    pub payload: Option<Payload>,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    #[serde(default)]
    pub available_for_sale: bool,
    pub quantity_available: Option<i64>,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    pub image: Option<Image>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub description_html: Option<String>,
    pub product_type: Option<String>,
    pub vendor: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub available_for_sale: bool,
    #[serde(default)]
    pub images: Nodes<Image>,
    #[serde(default)]
    pub variants: Nodes<ProductVariant>,
    pub seo: Option<Seo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterType {
    List,
    PriceRange,
    Boolean,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterValue {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub count: i64,
    /// JSON-encoded `ProductFilter` input selecting this value.
    pub input: String,
}

/// Storefront search/collection filter.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFilter {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FilterType,
    #[serde(default)]
    pub values: Vec<FilterValue>,
}

#[derive(Debug, Deserialize)]
pub struct GetProductData {
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    #[serde(default)]
    pub nodes: Vec<Product>,
    #[serde(default)]
    pub page_info: PageInfo,
    /// Collection filters.
    #[serde(default)]
    pub filters: Vec<ProductFilter>,
}

#[derive(Debug, Deserialize)]
pub struct ListProductsData {
    pub products: ProductConnection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConnection {
    pub total_count: Option<i64>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub product_filters: Vec<ProductFilter>,
    #[serde(default)]
    pub nodes: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct SearchProductsData {
    pub search: SearchConnection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub seo: Option<Seo>,
    #[serde(default)]
    pub products: ProductConnection,
}

#[derive(Debug, Deserialize)]
pub struct CollectionData {
    pub collection: Option<Collection>,
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub title: String,
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchandise {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    pub product: CartProduct,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCost {
    pub total_amount: Money,
    pub subtotal_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_amount_per_quantity: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub quantity: i64,
    pub merchandise: Merchandise,
    pub cost: CartLineCost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    pub total_amount: Money,
    pub subtotal_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tax_amount: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCode {
    pub applicable: bool,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: i64,
    #[serde(default)]
    pub lines: Nodes<CartLine>,
    pub cost: CartCost,
    #[serde(default)]
    pub discount_codes: Vec<DiscountCode>,
}

#[derive(Debug, Deserialize)]
pub struct GetCartData {
    pub cart: Option<Cart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: String,
    #[serde(default = "one")]
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_plan_id: Option<String>,
}

const fn one() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdateInput {
    pub id: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchandise_id: Option<String>,
}

// =============================================================================
// Customers (Admin API)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMarketingConsent {
    pub marketing_state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_opt_in_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub email: String,
    pub email_marketing_consent: EmailMarketingConsent,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_marketing_consent: Option<EmailMarketingConsent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub customer: Option<Customer>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerPayloadData {
    pub payload: Option<CustomerPayload>,
}

/// Variables of a mutation taking a single `input`.
#[derive(Debug, Serialize)]
pub struct InputVariables<T> {
    pub input: T,
}

/// Decoded `FilterValue::input`, or `Null` when it is not valid JSON.
#[must_use]
pub fn filter_input(value: &FilterValue) -> Value {
    serde_json::from_str(&value.input).unwrap_or(Value::Null)
}
