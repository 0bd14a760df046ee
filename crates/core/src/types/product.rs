//! Product, offer and pricing types.
//!
//! Prices use `rust_decimal::Decimal` internally and are written to JSON as
//! plain numbers, which is what storefront components expect from the
//! schema.org vocabulary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Enumerations
// =============================================================================

/// Kind of price carried by a [`UnitPriceSpecification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTypeEnumeration {
    /// The "was" price, usually rendered struck through.
    #[serde(rename = "https://schema.org/ListPrice")]
    ListPrice,
    /// The price the customer actually pays.
    #[serde(rename = "https://schema.org/SalePrice")]
    SalePrice,
    /// Suggested retail price.
    #[serde(rename = "https://schema.org/SRP")]
    Srp,
    /// Price charged by the supplier.
    #[serde(rename = "https://schema.org/InvoicePrice")]
    InvoicePrice,
}

/// Component a price applies to (only installments are used by adapters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceComponentTypeEnumeration {
    #[serde(rename = "https://schema.org/Installment")]
    Installment,
}

/// Stock status of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemAvailability {
    #[serde(rename = "https://schema.org/InStock")]
    InStock,
    #[default]
    #[serde(rename = "https://schema.org/OutOfStock")]
    OutOfStock,
}

impl ItemAvailability {
    /// Map a vendor "is available" flag.
    #[must_use]
    pub const fn from_available(available: bool) -> Self {
        if available {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }
}

// =============================================================================
// Leaf Types
// =============================================================================

/// Product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct ImageObject {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
}

/// Product brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct Brand {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Free-form name/value attribute attached to a product.
///
/// `value_reference` classifies the property (e.g. `SPECIFICATION`,
/// `INFORMATION`) so sections can group them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct PropertyValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_reference: Option<String>,
    #[serde(
        default,
        rename = "propertyID",
        skip_serializing_if = "Option::is_none"
    )]
    pub property_id: Option<String>,
}

impl PropertyValue {
    /// Build a property with a classification reference.
    #[must_use]
    pub fn new(
        name: Option<String>,
        value: Option<String>,
        value_reference: impl Into<String>,
    ) -> Self {
        Self {
            name,
            value,
            value_reference: Some(value_reference.into()),
            property_id: None,
        }
    }
}

/// Quantity wrapper used for inventory levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuantitativeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

// =============================================================================
// Offers
// =============================================================================

/// A single price point of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct UnitPriceSpecification {
    pub price_type: PriceTypeEnumeration,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_component_type: Option<PriceComponentTypeEnumeration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of installments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_duration: Option<i64>,
    /// Value of each installment.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub billing_increment: Option<Decimal>,
}

impl UnitPriceSpecification {
    /// A plain price of the given type.
    #[must_use]
    pub const fn new(price_type: PriceTypeEnumeration, price: Decimal) -> Self {
        Self {
            price_type,
            price,
            price_component_type: None,
            name: None,
            description: None,
            billing_duration: None,
            billing_increment: None,
        }
    }

    /// An installment plan: `count` payments of `value`, `total` overall.
    #[must_use]
    pub fn installment(
        name: impl Into<String>,
        count: i64,
        value: Decimal,
        total: Decimal,
    ) -> Self {
        let name = name.into();
        Self {
            price_type: PriceTypeEnumeration::SalePrice,
            price: total,
            price_component_type: Some(PriceComponentTypeEnumeration::Installment),
            description: Some(name.clone()),
            name: Some(name),
            billing_duration: Some(count),
            billing_increment: Some(value),
        }
    }
}

/// An offer from one seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct Offer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub price_specification: Vec<UnitPriceSpecification>,
    pub availability: ItemAvailability,
    #[serde(default)]
    pub inventory_level: QuantitativeValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_valid_until: Option<String>,
}

impl Offer {
    /// Look up the first price specification of a given type.
    #[must_use]
    pub fn price_of(&self, price_type: PriceTypeEnumeration) -> Option<Decimal> {
        self.price_specification
            .iter()
            .find(|spec| spec.price_type == price_type && spec.price_component_type.is_none())
            .map(|spec| spec.price)
    }
}

/// All offers for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct AggregateOffer {
    #[serde(with = "rust_decimal::serde::float")]
    pub high_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub low_price: Decimal,
    pub offer_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<String>,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl AggregateOffer {
    /// Aggregate offers, taking high/low prices from the offers themselves.
    ///
    /// Returns `None` when there is nothing to aggregate.
    #[must_use]
    pub fn from_offers(offers: Vec<Offer>, price_currency: Option<String>) -> Option<Self> {
        let high_price = offers.iter().map(|o| o.price).max()?;
        let low_price = offers.iter().map(|o| o.price).min()?;

        Some(Self {
            high_price,
            low_price,
            offer_count: offers.len(),
            price_currency,
            offers,
        })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A purchasable item (one SKU / variant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        rename = "inProductGroupWithID",
        skip_serializing_if = "Option::is_none"
    )]
    pub in_product_group_with_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub image: Vec<ImageObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_variant_of: Option<ProductGroup>,
    #[serde(default)]
    pub is_similar_to: Vec<Product>,
    #[serde(default)]
    pub additional_property: Vec<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offers: Option<AggregateOffer>,
}

/// The parent of a set of variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct ProductGroup {
    #[serde(rename = "productGroupID")]
    pub product_group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub has_variant: Vec<Product>,
    #[serde(default)]
    pub additional_property: Vec<PropertyValue>,
}
