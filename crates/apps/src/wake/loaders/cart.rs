//! Current cart, created on first visit.

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::client::GraphqlRequest;
use crate::context::InvokeContext;
use crate::error::Result;
use crate::wake::Wake;
use crate::wake::cart::{get_cart_cookie, set_cart_cookie};
use crate::wake::fragments::{CHECKOUT, CREATE_CHECKOUT, GET_CHECKOUT};
use crate::wake::types::{Checkout, CheckoutData};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Props {}

/// Load the checkout named by the cart cookie. Without a cookie, or when
/// Wake no longer knows the checkout, a new one is created and the cookie
/// re-pointed at it.
///
/// # Errors
///
/// Returns the client error of the checkout query or mutation.
#[instrument(skip(wake, ctx))]
pub async fn loader(wake: &Wake, _props: Props, ctx: &mut InvokeContext) -> Result<Checkout> {
    let existing = match get_cart_cookie(&ctx.request_headers) {
        Some(checkout_id) => {
            let data: CheckoutData = wake
                .storefront
                .query(GraphqlRequest::new(
                    GET_CHECKOUT,
                    &[CHECKOUT],
                    json!({ "checkoutId": checkout_id }),
                ))
                .await?;
            data.checkout
        }
        None => None,
    };

    let checkout = match existing {
        Some(checkout) => Some(checkout),
        None => {
            tracing::debug!("Creating Wake checkout");
            let data: CheckoutData = wake
                .storefront
                .query(GraphqlRequest::new(CREATE_CHECKOUT, &[CHECKOUT], json!({})))
                .await?;
            data.checkout
        }
    };

    let checkout = checkout.unwrap_or_default();
    set_cart_cookie(&mut ctx.response_headers, checkout.checkout_id.as_deref());
    Ok(checkout)
}
