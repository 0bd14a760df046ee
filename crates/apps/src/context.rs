//! Per-invocation request/response pipe handed to every loader and action.

use axum::http::HeaderMap;
use url::Url;

use crate::cookies;

/// What a block sees of the page request, and where it writes headers back.
#[derive(Debug, Clone)]
pub struct InvokeContext {
    /// Page URL the block runs for; loaders read query params from it.
    pub url: Url,
    /// Incoming request headers (cookies).
    pub request_headers: HeaderMap,
    /// Headers to add to the response (`Set-Cookie`).
    pub response_headers: HeaderMap,
}

impl InvokeContext {
    #[must_use]
    pub fn new(url: Url, request_headers: HeaderMap) -> Self {
        Self {
            url,
            request_headers,
            response_headers: HeaderMap::new(),
        }
    }

    /// Fresh context for one entry of a batch; response headers start empty.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self::new(self.url.clone(), self.request_headers.clone())
    }

    /// Append the response headers of another context.
    pub fn merge_response_headers(&mut self, headers: HeaderMap) {
        let mut last_name = None;
        for (name, value) in headers {
            if let Some(name) = name {
                last_name = Some(name);
            }
            if let Some(name) = &last_name {
                self.response_headers.append(name.clone(), value);
            }
        }
    }

    /// First value of a page query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<String> {
        cookies::get_cookie(&self.request_headers, name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderValue, header};

    use super::*;

    #[test]
    fn test_query_param() {
        let ctx = InvokeContext::new(
            Url::parse("https://shop.example.com/tenis?busca=azul&page=2&page=3").unwrap(),
            HeaderMap::new(),
        );
        assert_eq!(ctx.query_param("busca").as_deref(), Some("azul"));
        assert_eq!(ctx.query_param("page").as_deref(), Some("2"));
        assert_eq!(ctx.query_param("sort"), None);
    }

    #[test]
    fn test_merge_keeps_every_set_cookie() {
        let mut root = InvokeContext::new(
            Url::parse("https://shop.example.com/").unwrap(),
            HeaderMap::new(),
        );

        let mut a = root.fork();
        a.response_headers
            .append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
        a.response_headers
            .append(header::SET_COOKIE, HeaderValue::from_static("b=2"));
        let mut b = root.fork();
        b.response_headers
            .append(header::SET_COOKIE, HeaderValue::from_static("c=3"));

        root.merge_response_headers(a.response_headers);
        root.merge_response_headers(b.response_headers);

        let values: Vec<_> = cookies::set_cookies(&root.response_headers).collect();
        assert_eq!(values, vec!["a=1", "b=2", "c=3"]);
    }
}
