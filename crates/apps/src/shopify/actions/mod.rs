pub mod cart;
pub mod customer;
