//! `ca-cli invoke`.

use std::io::Write as _;

use axum::http::{HeaderMap, HeaderValue, header};
use commerce_apps::cookies::set_cookies;
use commerce_apps::{AppsConfig, InvokeContext, Registry};
use serde_json::Value;
use url::Url;

use super::CommandError;

/// Context for a shell invocation: the page URL (or the configured base URL)
/// and an optional `Cookie` header.
fn build_context(
    base_url: &str,
    url: Option<&str>,
    cookie: Option<&str>,
) -> Result<InvokeContext, CommandError> {
    let url = Url::parse(url.unwrap_or(base_url))?;

    let mut headers = HeaderMap::new();
    if let Some(cookie) = cookie {
        let value =
            HeaderValue::from_str(cookie).map_err(|e| CommandError::Cookie(e.to_string()))?;
        headers.insert(header::COOKIE, value);
    }
    Ok(InvokeContext::new(url, headers))
}

fn parse_props(props: Option<&str>) -> Result<Value, CommandError> {
    Ok(props.map(serde_json::from_str).transpose()?.unwrap_or(Value::Null))
}

/// Run one block and print its output as pretty JSON, followed by any
/// `Set-Cookie` it produced.
///
/// # Errors
///
/// Returns an error for bad arguments, unbuildable clients, or whatever the
/// block fails with.
pub async fn run(
    config: &AppsConfig,
    key: &str,
    props: Option<&str>,
    url: Option<&str>,
    cookie: Option<&str>,
) -> Result<(), CommandError> {
    let registry = Registry::from_config(config)?;
    let props = parse_props(props)?;
    let mut ctx = build_context(&config.base_url, url, cookie)?;

    tracing::info!(key, url = %ctx.url, "Invoking block");
    let value = registry.invoke(key, props, &mut ctx).await?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &value)?;
    writeln!(stdout)?;
    for cookie in set_cookies(&ctx.response_headers) {
        writeln!(stdout, "Set-Cookie: {cookie}")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults_to_base_url() {
        let ctx = build_context("http://localhost:8000", None, None).unwrap();
        assert_eq!(ctx.url.as_str(), "http://localhost:8000/");
        assert!(ctx.request_headers.is_empty());
    }

    #[test]
    fn test_context_carries_cookies() {
        let ctx = build_context(
            "http://localhost:8000",
            Some("https://shop.example.com/busca?busca=caneca"),
            Some("carrinho-id=abc; other=1"),
        )
        .unwrap();
        assert_eq!(ctx.query_param("busca").as_deref(), Some("caneca"));
        assert_eq!(ctx.cookie("carrinho-id").as_deref(), Some("abc"));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(
            build_context("http://localhost:8000", Some("not a url"), None),
            Err(CommandError::Url(_))
        ));
        assert!(matches!(parse_props(Some("{")), Err(CommandError::Props(_))));
        assert_eq!(parse_props(None).unwrap(), Value::Null);
    }
}
