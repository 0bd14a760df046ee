//! Current cart, created on first visit.

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::client::GraphqlRequest;
use crate::context::InvokeContext;
use crate::error::Result;
use crate::shopify::Shopify;
use crate::shopify::cart::{get_cart_cookie, mutated_cart, set_cart_cookie};
use crate::shopify::queries::{CART, CREATE_CART, GET_CART};
use crate::shopify::types::{Cart, GetCartData, PayloadData};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {}

/// Load the cart named by the cookie, creating one when there is none or
/// Shopify no longer knows it.
///
/// # Errors
///
/// Returns the client error of the cart query or `cartCreate`.
#[instrument(skip(shopify, ctx))]
pub async fn loader(shopify: &Shopify, _props: Props, ctx: &mut InvokeContext) -> Result<Cart> {
    if let Some(cart_id) = get_cart_cookie(&ctx.request_headers) {
        let data: GetCartData = shopify
            .storefront
            .query(GraphqlRequest::new(GET_CART, &[CART], json!({ "id": cart_id })))
            .await?;
        if let Some(cart) = data.cart {
            return Ok(cart);
        }
    }

    tracing::debug!("Creating Shopify cart");
    let data: PayloadData = shopify
        .storefront
        .query(GraphqlRequest::new(CREATE_CART, &[CART], json!({})))
        .await?;
    let cart = mutated_cart(data.payload)?;
    set_cart_cookie(&mut ctx.response_headers, Some(&cart.id));
    Ok(cart)
}
