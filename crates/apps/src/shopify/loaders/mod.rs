pub mod cart;
pub mod product_details_page;
pub mod product_list;
pub mod product_listing_page;
