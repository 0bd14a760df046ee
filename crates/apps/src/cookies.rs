//! Cookie read/write helpers over raw header maps.

use axum::http::{HeaderMap, HeaderValue, header};
use cookie::Cookie;
use cookie::time::Duration;

/// How long cart cookies live.
pub const CART_COOKIE_MAX_AGE: Duration = Duration::days(10);

/// Read a cookie from every `Cookie` header of a request.
#[must_use]
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse_encoded)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

/// Append a `Set-Cookie` header.
pub fn set_cookie(headers: &mut HeaderMap, cookie: &Cookie<'_>) {
    match HeaderValue::from_str(&cookie.encoded().to_string()) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(name = cookie.name(), error = %e, "Dropping unencodable cookie"),
    }
}

/// Build an HttpOnly, site-wide cart cookie.
#[must_use]
pub fn cart_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .max_age(CART_COOKIE_MAX_AGE)
        .expires(cookie::time::OffsetDateTime::now_utc() + CART_COOKIE_MAX_AGE)
        .build()
}

/// Every `Set-Cookie` value in a header map.
pub fn set_cookies(headers: &HeaderMap) -> impl Iterator<Item = &str> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1; b=2"));
        headers.append(header::COOKIE, HeaderValue::from_static("carrinho-id=abc-123"));

        assert_eq!(get_cookie(&headers, "b").as_deref(), Some("2"));
        assert_eq!(get_cookie(&headers, "carrinho-id").as_deref(), Some("abc-123"));
        assert_eq!(get_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_get_cookie_decodes_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("shopify_cart_id=gid%3A%2F%2Fshopify%2FCart%2F1"),
        );
        assert_eq!(
            get_cookie(&headers, "shopify_cart_id").as_deref(),
            Some("gid://shopify/Cart/1")
        );
    }

    #[test]
    fn test_set_cart_cookie_attributes() {
        let mut headers = HeaderMap::new();
        set_cookie(&mut headers, &cart_cookie("carrinho-id", "abc".to_string()));

        let written: Vec<&str> = set_cookies(&headers).collect();
        assert_eq!(written.len(), 1);
        let parsed = Cookie::parse(written[0].to_string()).unwrap();
        assert_eq!(parsed.name(), "carrinho-id");
        assert_eq!(parsed.value(), "abc");
        assert_eq!(parsed.path(), Some("/"));
        assert_eq!(parsed.http_only(), Some(true));
        assert_eq!(parsed.max_age(), Some(CART_COOKIE_MAX_AGE));
    }
}
