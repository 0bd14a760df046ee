//! Analytics event item (GA4 `items[]` shape).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An item reported in e-commerce analytics events such as `add_to_cart`.
///
/// Field names are snake_case on the wire, as GA4 expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnalyticsItem {
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_list_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_list_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub quantity: i64,
}
