//! Shopify cart cookie.

use axum::http::HeaderMap;

use super::types::{Cart, Payload, UserError};
use crate::client::ClientError;
use crate::cookies::{cart_cookie, get_cookie, set_cookie};

pub const CART_COOKIE: &str = "shopify_cart_id";

#[must_use]
pub fn get_cart_cookie(headers: &HeaderMap) -> Option<String> {
    get_cookie(headers, CART_COOKIE)
}

pub fn set_cart_cookie(headers: &mut HeaderMap, cart_id: Option<&str>) {
    if let Some(id) = cart_id {
        set_cookie(headers, &cart_cookie(CART_COOKIE, id.to_string()));
    }
}

/// Join mutation user errors into one message.
#[must_use]
pub fn user_error_message(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The cart a mutation returned.
///
/// # Errors
///
/// `UserError` when Shopify rejected the mutation, `GraphQL` when it returned
/// no cart.
pub fn mutated_cart(payload: Option<Payload>) -> Result<Cart, ClientError> {
    let payload = payload.ok_or_else(|| ClientError::graphql("Cart mutation returned no payload"))?;
    if !payload.user_errors.is_empty() {
        return Err(ClientError::UserError(user_error_message(&payload.user_errors)));
    }
    payload
        .cart
        .ok_or_else(|| ClientError::graphql("Cart mutation returned no cart"))
}
