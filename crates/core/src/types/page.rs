//! Page-level envelopes returned by loaders.

use serde::{Deserialize, Serialize};

use super::product::Product;

// =============================================================================
// Breadcrumbs
// =============================================================================

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct ListItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absolute URL of the step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// 1-based position in the trail.
    pub position: usize,
}

/// An ordered breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct BreadcrumbList {
    pub item_list_element: Vec<ListItem>,
    pub number_of_items: usize,
}

impl BreadcrumbList {
    /// Build a list, keeping `number_of_items` in sync with the items.
    #[must_use]
    pub fn new(item_list_element: Vec<ListItem>) -> Self {
        Self {
            number_of_items: item_list_element.len(),
            item_list_element,
        }
    }
}

// =============================================================================
// SEO
// =============================================================================

/// Page metadata for search engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub canonical: String,
}

// =============================================================================
// Filters
// =============================================================================

/// A facet value the shopper can toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterToggleValue {
    pub value: String,
    pub label: String,
    pub quantity: i64,
    pub selected: bool,
    /// URL that applies (or removes, when selected) this value.
    pub url: String,
}

/// A facet made of toggleable values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterToggle {
    pub key: String,
    pub label: String,
    pub quantity: i64,
    pub values: Vec<FilterToggleValue>,
}

/// Bounds of a range facet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterRangeValue {
    pub min: f64,
    pub max: f64,
}

/// A numeric range facet (usually price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRange {
    pub key: String,
    pub label: String,
    pub values: FilterRangeValue,
}

/// A listing page facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum Filter {
    FilterToggle(FilterToggle),
    FilterRange(FilterRange),
}

// =============================================================================
// Pages
// =============================================================================

/// Sort choice offered on listing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub value: String,
    pub label: String,
}

impl SortOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Pagination state of a listing page.
///
/// `next_page` / `previous_page` are query strings (`?page=2`) relative to the
/// current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_per_page: Option<i64>,
}

/// Data backing a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct ProductDetailsPage {
    pub breadcrumb_list: BreadcrumbList,
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

/// Data backing a search or category page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type", rename_all = "camelCase")]
pub struct ProductListingPage {
    pub breadcrumb: BreadcrumbList,
    pub filters: Vec<Filter>,
    pub products: Vec<Product>,
    pub page_info: PageInfo,
    pub sort_options: Vec<SortOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}
