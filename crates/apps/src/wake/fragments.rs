//! Wake Storefront GraphQL documents.

/// Fields shared by search nodes and single products.
macro_rules! product_fields {
    () => {
        "
  mainVariant
  productId
  productName
  productVariantId
  variantName
  alias
  sku
  ean
  available
  stock
  condition
  attributes {
    name
    value
  }
  informations {
    title
    value
    type
  }
  images {
    url
    fileName
  }
  prices {
    listPrice
    price
    discountPercentage
    discounted
  }
  productBrand {
    name
    alias
    logoUrl
    fullUrlLogo
  }
  seller {
    name
  }"
    };
}

pub const PRODUCT: &str = concat!("fragment Product on Product {", product_fields!(), "\n}");

pub const SINGLE_PRODUCT: &str = concat!(
    "fragment SingleProduct on SingleProduct {",
    product_fields!(),
    "
  productCategories {
    id
    main
    name
    url
    hierarchy
  }
  seo {
    name
    type
    content
  }
}"
);

pub const CHECKOUT: &str = "fragment Checkout on Checkout {
  checkoutId
  completed
  coupon
  shippingFee
  subtotal
  total
  url
  products {
    productId
    productVariantId
    name
    brand
    imageUrl
    url
    quantity
    price
    listPrice
    ajustedPrice
  }
}";

pub const GET_PRODUCT: &str = "query GetProduct($productId: Long!) { product(productId: $productId) { ...SingleProduct } }";

pub const SEARCH: &str = "query Search($operation: Operation!, $query: String, $first: Int!, $sortDirection: SortDirection, $sortKey: ProductSearchSortKeys, $filters: [ProductFilterInput]) {
  search(query: $query, operation: $operation) {
    aggregations {
      filters {
        field
        origin
        values {
          name
          quantity
        }
      }
    }
    breadcrumbs {
      link
      text
    }
    pageSize
    redirectUrl
    products(first: $first, sortDirection: $sortDirection, sortKey: $sortKey, filters: $filters) {
      nodes {
        ...Product
      }
      pageInfo {
        hasNextPage
        hasPreviousPage
      }
      totalCount
    }
  }
}";

pub const GET_CHECKOUT: &str =
    "query GetCheckout($checkoutId: String!) { checkout(checkoutId: $checkoutId) { ...Checkout } }";

pub const CREATE_CHECKOUT: &str = "mutation CreateCheckout { checkout: createCheckout { ...Checkout } }";

pub const ADD_ITEM: &str = "mutation AddItemToCart($input: CheckoutProductInput!) { checkout: checkoutAddProduct(input: $input) { ...Checkout } }";

pub const UPDATE_ITEM_QUANTITY: &str = "mutation UpdateItemQuantity($input: CheckoutProductInput!) { checkout: checkoutAddProduct(input: $input) { ...Checkout } }";

pub const REMOVE_ITEM: &str = "mutation RemoveItemFromCart($input: CheckoutProductInput!) { checkout: checkoutRemoveProduct(input: $input) { ...Checkout } }";

pub const ADD_COUPON: &str = "mutation AddCoupon($checkoutId: Uuid!, $coupon: String!) { checkout: checkoutAddCoupon(checkoutId: $checkoutId, coupon: $coupon) { ...Checkout } }";

pub const REMOVE_COUPON: &str = "mutation RemoveCoupon($checkoutId: Uuid!) { checkout: checkoutRemoveCoupon(checkoutId: $checkoutId) { ...Checkout } }";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragments_are_named_for_their_spreads() {
        assert!(PRODUCT.starts_with("fragment Product on Product {"));
        assert!(SINGLE_PRODUCT.contains("productCategories"));
        assert!(!PRODUCT.contains("productCategories"));
        assert!(SEARCH.contains("...Product"));
        assert!(GET_PRODUCT.contains("...SingleProduct"));
        for mutation in [ADD_ITEM, UPDATE_ITEM_QUANTITY, REMOVE_ITEM, ADD_COUPON, REMOVE_COUPON] {
            assert!(mutation.contains("checkout: checkout"), "{mutation}");
            assert!(mutation.contains("...Checkout"));
        }
    }
}
