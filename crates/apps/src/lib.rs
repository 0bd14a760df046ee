//! Commerce apps: Shopify, VTEX and Wake adapters over a shared catalog
//! schema, invoked by manifest key.
//!
//! # Layout
//!
//! - [`client`] - GraphQL and REST plumbing shared by every vendor
//! - [`shopify`], [`vtex`], [`wake`] - one module per vendor app
//! - [`manifest`] - the registry that routes a block key to its app
//! - [`routes`] - the `/live` HTTP surface served by the `commerce-apps` binary

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod apps;
pub mod client;
pub mod config;
pub mod context;
pub mod cookies;
pub mod error;
pub mod manifest;
pub mod middleware;
pub mod routes;
pub mod shopify;
pub mod state;
pub mod urls;
pub mod vtex;
pub mod wake;

pub use config::AppsConfig;
pub use context::InvokeContext;
pub use error::{AppError, Result};
pub use manifest::Registry;
pub use state::AppState;
