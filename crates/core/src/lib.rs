//! Commerce Apps Core - Shared catalog schema.
//!
//! Every vendor adapter (Shopify, VTEX, Wake) produces the types defined here:
//! a schema.org-flavoured vocabulary of `Product`, `Offer`, `BreadcrumbList`
//! and the page envelopes built from them.
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients. Adapters depend on it; it depends on nothing but serde.
//!
//! # Modules
//!
//! - [`types`] - Catalog schema types serialised with an `"@type"` discriminator
//! - [`text`] - Slug and capitalisation helpers used to build storefront URLs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod constants;
pub mod text;
pub mod types;

pub use constants::{DEFAULT_IMAGE_URL, default_image};
pub use text::{capitalize, slugify};
pub use types::*;
