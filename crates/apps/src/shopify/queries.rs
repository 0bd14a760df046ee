//! Storefront and Admin GraphQL documents.
//!
//! Operations alias their mutation root field to `payload` so every cart
//! mutation decodes into the same [`Payload`](super::types::Payload) shape.

pub const PRODUCT_VARIANT: &str = "fragment ProductVariant on ProductVariant {
  availableForSale
  barcode
  compareAtPrice { amount currencyCode }
  id
  image { altText url }
  price { amount currencyCode }
  quantityAvailable
  selectedOptions { name value }
  sku
  title
}";

pub const PRODUCT: &str = "fragment Product on Product {
  availableForSale
  createdAt
  description
  descriptionHtml
  handle
  id
  images(first: 10) { nodes { altText url } }
  productType
  seo { title description }
  tags
  title
  vendor
  variants(first: 10) { nodes { ...ProductVariant } }
}";

pub const FILTER: &str = "fragment Filter on Filter {
  id
  label
  type
  values { id count input label }
}";

pub const CART: &str = "fragment Cart on Cart {
  id
  checkoutUrl
  totalQuantity
  lines(first: 100) {
    nodes {
      id
      quantity
      merchandise {
        ... on ProductVariant {
          id
          title
          image { altText url }
          product { title handle }
          price { amount currencyCode }
        }
      }
      cost {
        totalAmount { amount currencyCode }
        subtotalAmount { amount currencyCode }
        compareAtAmountPerQuantity { amount currencyCode }
      }
    }
  }
  cost {
    totalAmount { amount currencyCode }
    subtotalAmount { amount currencyCode }
    totalTaxAmount { amount currencyCode }
  }
  discountCodes { applicable code }
}";

pub const GET_PRODUCT: &str = "query GetProduct($handle: String) {
  product(handle: $handle) { ...Product }
}";

pub const LIST_PRODUCTS: &str = "query ListProducts($first: Int, $query: String, $sortKey: ProductSortKeys, $reverse: Boolean) {
  products(first: $first, query: $query, sortKey: $sortKey, reverse: $reverse) {
    nodes { ...Product }
    pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
  }
}";

pub const SEARCH_PRODUCTS: &str = "query SearchProducts($first: Int, $last: Int, $after: String, $before: String, $query: String!, $productFilters: [ProductFilter!], $sortKey: SearchSortKeys, $reverse: Boolean) {
  search(first: $first, last: $last, after: $after, before: $before, query: $query, productFilters: $productFilters, types: PRODUCT, sortKey: $sortKey, reverse: $reverse) {
    totalCount
    pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    productFilters { ...Filter }
    nodes { ... on Product { ...Product } }
  }
}";

pub const PRODUCTS_BY_COLLECTION: &str = "query ProductsByCollection($first: Int, $last: Int, $after: String, $before: String, $handle: String, $filters: [ProductFilter!], $sortKey: ProductCollectionSortKeys, $reverse: Boolean) {
  collection(handle: $handle) {
    handle
    title
    description
    seo { title description }
    products(first: $first, last: $last, after: $after, before: $before, filters: $filters, sortKey: $sortKey, reverse: $reverse) {
      pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
      filters { ...Filter }
      nodes { ...Product }
    }
  }
}";

pub const GET_CART: &str = "query GetCart($id: ID!) {
  cart(id: $id) { ...Cart }
}";

pub const CREATE_CART: &str = "mutation CreateCart {
  payload: cartCreate { cart { ...Cart } userErrors { field message } }
}";

pub const ADD_ITEMS: &str = "mutation AddItemsToCart($cartId: ID!, $lines: [CartLineInput!]!) {
  payload: cartLinesAdd(cartId: $cartId, lines: $lines) { cart { ...Cart } userErrors { field message } }
}";

pub const UPDATE_ITEMS: &str = "mutation UpdateCartItems($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  payload: cartLinesUpdate(cartId: $cartId, lines: $lines) { cart { ...Cart } userErrors { field message } }
}";

pub const UPDATE_COUPONS: &str = "mutation UpdateCartCoupons($cartId: ID!, $discountCodes: [String!]) {
  payload: cartDiscountCodesUpdate(cartId: $cartId, discountCodes: $discountCodes) { cart { ...Cart } userErrors { field message } }
}";

/// Admin API.
pub const CREATE_CUSTOMER: &str = "mutation CreateCustomer($input: CustomerInput!) {
  payload: customerCreate(input: $input) {
    customer {
      id
      email
      tags
      emailMarketingConsent { marketingState marketingOptInLevel consentUpdatedAt }
    }
    userErrors { field message }
  }
}";
