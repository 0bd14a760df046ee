//! Cart mutations. Each one needs the cart cookie set by the cart loader.

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::client::GraphqlRequest;
use crate::context::InvokeContext;
use crate::error::{AppError, Result};
use crate::shopify::Shopify;
use crate::shopify::cart::{get_cart_cookie, mutated_cart, set_cart_cookie};
use crate::shopify::queries::{ADD_ITEMS, CART, UPDATE_COUPONS, UPDATE_ITEMS};
use crate::shopify::types::{Cart, CartLineInput, CartLineUpdateInput, PayloadData};

#[derive(Debug, Clone, Deserialize)]
pub struct AddItemsProps {
    pub lines: Vec<CartLineInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemsProps {
    pub lines: Vec<CartLineUpdateInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCouponsProps {
    #[serde(default)]
    pub discount_codes: Vec<String>,
}

fn cart_id(ctx: &InvokeContext) -> Result<String> {
    get_cart_cookie(&ctx.request_headers)
        .ok_or_else(|| AppError::http(StatusCode::BAD_REQUEST, "Missing cart cookie"))
}

async fn mutate(
    shopify: &Shopify,
    document: &str,
    variables: Value,
    ctx: &mut InvokeContext,
) -> Result<Cart> {
    let data: PayloadData = shopify
        .storefront
        .query(GraphqlRequest::new(document, &[CART], variables))
        .await?;
    let cart = mutated_cart(data.payload)?;
    set_cart_cookie(&mut ctx.response_headers, Some(&cart.id));
    Ok(cart)
}

/// # Errors
///
/// 400 without a cart cookie, otherwise the mutation's client or user error.
#[instrument(skip(shopify, props, ctx), fields(lines = props.lines.len()))]
pub async fn add_items(
    shopify: &Shopify,
    props: AddItemsProps,
    ctx: &mut InvokeContext,
) -> Result<Cart> {
    let cart_id = cart_id(ctx)?;
    mutate(
        shopify,
        ADD_ITEMS,
        json!({ "cartId": cart_id, "lines": props.lines }),
        ctx,
    )
    .await
}

/// Set line quantities; a quantity of 0 removes the line.
///
/// # Errors
///
/// 400 without a cart cookie, otherwise the mutation's client or user error.
#[instrument(skip(shopify, props, ctx), fields(lines = props.lines.len()))]
pub async fn update_items(
    shopify: &Shopify,
    props: UpdateItemsProps,
    ctx: &mut InvokeContext,
) -> Result<Cart> {
    let cart_id = cart_id(ctx)?;
    mutate(
        shopify,
        UPDATE_ITEMS,
        json!({ "cartId": cart_id, "lines": props.lines }),
        ctx,
    )
    .await
}

/// Replace the cart's discount codes.
///
/// # Errors
///
/// 400 without a cart cookie, otherwise the mutation's client or user error.
#[instrument(skip(shopify, ctx))]
pub async fn update_coupons(
    shopify: &Shopify,
    props: UpdateCouponsProps,
    ctx: &mut InvokeContext,
) -> Result<Cart> {
    let cart_id = cart_id(ctx)?;
    mutate(
        shopify,
        UPDATE_COUPONS,
        json!({ "cartId": cart_id, "discountCodes": props.discount_codes }),
        ctx,
    )
    .await
}
