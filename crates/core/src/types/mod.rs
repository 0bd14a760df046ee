//! Catalog schema types shared by every adapter.
//!
//! Field names follow the schema.org vocabulary (camelCase on the wire) and
//! each object carries an `"@type"` discriminator so storefront sections can
//! tell a `Product` from a `ProductGroup` without extra context.

pub mod analytics;
pub mod page;
pub mod product;

pub use analytics::AnalyticsItem;
pub use page::{
    BreadcrumbList, Filter, FilterRange, FilterRangeValue, FilterToggle, FilterToggleValue,
    ListItem, PageInfo, ProductDetailsPage, ProductListingPage, Seo, SortOption,
};
pub use product::{
    AggregateOffer, Brand, ImageObject, ItemAvailability, Offer, PriceComponentTypeEnumeration,
    PriceTypeEnumeration, Product, ProductGroup, PropertyValue, QuantitativeValue,
    UnitPriceSpecification,
};
