//! Invoke loaders and actions over HTTP.

use std::collections::BTreeMap;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use url::Url;

use crate::context::InvokeContext;
use crate::error::{AppError, Result};
use crate::manifest::InvokeRequest;
use crate::state::AppState;

/// Page URL a block runs for: the `Referer` when it parses, otherwise the
/// configured base URL carrying the invoke request's query string.
fn page_url(headers: &HeaderMap, base_url: &str, query: Option<&str>) -> Result<Url> {
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Url::parse(value).ok());
    if let Some(url) = referer {
        return Ok(url);
    }

    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::Internal(format!("invalid base url {base_url}: {e}")))?;
    url.set_query(query.filter(|q| !q.is_empty()));
    Ok(url)
}

/// Response body plus every `Set-Cookie` the blocks appended.
fn respond(value: Value, ctx: &InvokeContext) -> Response {
    let mut headers = HeaderMap::new();
    for cookie in ctx.response_headers.get_all(header::SET_COOKIE) {
        headers.append(header::SET_COOKIE, cookie.clone());
    }
    (headers, Json(value)).into_response()
}

fn context(state: &AppState, headers: HeaderMap, query: Option<&str>) -> Result<InvokeContext> {
    let url = page_url(&headers, &state.config().base_url, query)?;
    Ok(InvokeContext::new(url, headers))
}

/// `POST /live/invoke/{*key}`: the body is the block's props; empty means
/// all defaults.
///
/// # Errors
///
/// Whatever the registry or the block fails with.
pub async fn invoke(
    State(state): State<AppState>,
    Path(key): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let props: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)?
    };
    let mut ctx = context(&state, headers, query.as_deref())?;

    let value = state.registry().invoke(&key, props, &mut ctx).await?;
    Ok(respond(value, &ctx))
}

/// `POST /live/invoke`: run a map of named invocations concurrently.
///
/// # Errors
///
/// 400 for a malformed batch, otherwise the first error of any entry.
pub async fn invoke_batch(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let batch: BTreeMap<String, InvokeRequest> = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid batch: {e}")))?;
    let mut ctx = context(&state, headers, query.as_deref())?;

    let out = state.registry().invoke_batch(batch, &mut ctx).await?;
    Ok(respond(Value::Object(out), &ctx))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_page_url_prefers_referer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("https://shop.example.com/tenis?page=2"),
        );
        let url = page_url(&headers, "http://localhost:8000", Some("busca=x")).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/tenis?page=2");
    }

    #[test]
    fn test_page_url_falls_back_to_base() {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_static("not a url"));
        let url = page_url(&headers, "http://localhost:8000", Some("busca=caneca")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/?busca=caneca");

        let url = page_url(&HeaderMap::new(), "http://localhost:8000", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_respond_copies_set_cookies() {
        let mut ctx = InvokeContext::new(
            Url::parse("https://shop.example.com/").unwrap(),
            HeaderMap::new(),
        );
        ctx.response_headers
            .append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
        ctx.response_headers
            .append(header::SET_COOKIE, HeaderValue::from_static("b=2"));

        let response = respond(serde_json::json!({}), &ctx);
        assert_eq!(response.headers().get_all(header::SET_COOKIE).iter().count(), 2);
    }
}
