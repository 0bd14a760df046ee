//! Wake cart cookie.

use axum::http::HeaderMap;

use crate::cookies::{cart_cookie, get_cookie, set_cookie};

pub const CART_COOKIE: &str = "carrinho-id";

#[must_use]
pub fn get_cart_cookie(headers: &HeaderMap) -> Option<String> {
    get_cookie(headers, CART_COOKIE)
}

/// Point the cart cookie at `checkout_id`; `None` leaves the response alone.
pub fn set_cart_cookie(headers: &mut HeaderMap, checkout_id: Option<&str>) {
    if let Some(id) = checkout_id {
        set_cookie(headers, &cart_cookie(CART_COOKIE, id.to_string()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderValue, header};

    use super::*;
    use crate::cookies::set_cookies;

    #[test]
    fn test_cart_cookie_round_trip() {
        let mut response = HeaderMap::new();
        set_cart_cookie(&mut response, Some("3f1c-uuid"));
        let written = set_cookies(&response).next().unwrap();
        assert!(written.starts_with("carrinho-id=3f1c-uuid"));

        let mut request = HeaderMap::new();
        request.insert(header::COOKIE, HeaderValue::from_static("carrinho-id=3f1c-uuid"));
        assert_eq!(get_cart_cookie(&request).as_deref(), Some("3f1c-uuid"));
    }

    #[test]
    fn test_set_none_writes_nothing() {
        let mut response = HeaderMap::new();
        set_cart_cookie(&mut response, None);
        assert!(response.is_empty());
    }
}
