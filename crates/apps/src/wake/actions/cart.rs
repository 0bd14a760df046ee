//! Cart mutations. Each one needs the cart cookie set by the cart loader.

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::client::GraphqlRequest;
use crate::context::InvokeContext;
use crate::error::{AppError, Result};
use crate::wake::Wake;
use crate::wake::cart::{get_cart_cookie, set_cart_cookie};
use crate::wake::fragments::{
    ADD_COUPON, ADD_ITEM, CHECKOUT, REMOVE_COUPON, REMOVE_ITEM, UPDATE_ITEM_QUANTITY,
};
use crate::wake::types::{Checkout, CheckoutData, CheckoutProductInput, CheckoutProductItem};

/// Quantity sent when removing a line, large enough to drop all of it.
const REMOVE_ALL: i64 = 1_000_000;

#[derive(Debug, Clone, Deserialize)]
pub struct CouponProps {
    pub coupon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoveCouponProps {}

fn cart_id(ctx: &InvokeContext) -> Result<String> {
    get_cart_cookie(&ctx.request_headers)
        .ok_or_else(|| AppError::http(StatusCode::BAD_REQUEST, "Missing cart cookie"))
}

/// Run a checkout mutation and re-point the cart cookie at the result.
async fn mutate(
    wake: &Wake,
    document: &str,
    variables: Value,
    ctx: &mut InvokeContext,
) -> Result<Checkout> {
    let data: CheckoutData = wake
        .storefront
        .query(GraphqlRequest::new(document, &[CHECKOUT], variables))
        .await?;

    let checkout = data.checkout.unwrap_or_default();
    set_cart_cookie(&mut ctx.response_headers, checkout.checkout_id.as_deref());
    Ok(checkout)
}

fn product_input(id: String, item: CheckoutProductItem) -> Value {
    let input = CheckoutProductInput {
        id,
        products: vec![item],
    };
    json!({ "input": input })
}

/// Add a variant to the cart.
///
/// # Errors
///
/// 400 without a cart cookie, or the client error of the mutation.
#[instrument(skip(wake, ctx), fields(variant = item.product_variant_id))]
pub async fn add_item(
    wake: &Wake,
    item: CheckoutProductItem,
    ctx: &mut InvokeContext,
) -> Result<Checkout> {
    let id = cart_id(ctx)?;
    mutate(wake, ADD_ITEM, product_input(id, item), ctx).await
}

/// Add to a line's quantity, or drop the line when the quantity is below 1.
///
/// # Errors
///
/// 400 without a cart cookie, or the client error of the mutation.
#[instrument(skip(wake, ctx), fields(variant = item.product_variant_id))]
pub async fn update_item_quantity(
    wake: &Wake,
    mut item: CheckoutProductItem,
    ctx: &mut InvokeContext,
) -> Result<Checkout> {
    let id = cart_id(ctx)?;
    if item.quantity < 1 {
        item.quantity = REMOVE_ALL;
        mutate(wake, REMOVE_ITEM, product_input(id, item), ctx).await
    } else {
        mutate(wake, UPDATE_ITEM_QUANTITY, product_input(id, item), ctx).await
    }
}

/// # Errors
///
/// 400 without a cart cookie, or the client error of the mutation.
#[instrument(skip(wake, ctx))]
pub async fn add_coupon(
    wake: &Wake,
    props: CouponProps,
    ctx: &mut InvokeContext,
) -> Result<Checkout> {
    let id = cart_id(ctx)?;
    mutate(
        wake,
        ADD_COUPON,
        json!({ "checkoutId": id, "coupon": props.coupon }),
        ctx,
    )
    .await
}

/// # Errors
///
/// 400 without a cart cookie, or the client error of the mutation.
#[instrument(skip(wake, ctx))]
pub async fn remove_coupon(
    wake: &Wake,
    _props: RemoveCouponProps,
    ctx: &mut InvokeContext,
) -> Result<Checkout> {
    let id = cart_id(ctx)?;
    mutate(wake, REMOVE_COUPON, json!({ "checkoutId": id }), ctx).await
}
