//! JSON REST transport with a stale-while-revalidate GET cache.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{ClientError, excerpt};

/// Cache tag attached to a GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    #[default]
    NoStore,
    StaleWhileRevalidate,
}

/// Shorthand for [`CachePolicy::StaleWhileRevalidate`].
pub const STALE: CachePolicy = CachePolicy::StaleWhileRevalidate;

const CACHE_TTL: Duration = Duration::from_secs(60);
const CACHE_CAPACITY: u64 = 1000;

/// Decoded body plus the response headers (some vendors report totals there).
#[derive(Debug, Clone)]
pub struct RestResponse<T> {
    pub body: T,
    pub headers: HeaderMap,
}

#[derive(Debug)]
struct CachedResponse {
    body: String,
    headers: HeaderMap,
}

/// Client for one REST origin.
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    client: reqwest::Client,
    base: String,
    cache: Cache<String, Arc<CachedResponse>>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base", &self.inner.base)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a client rooted at `base` that sends `headers` with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid URL or the HTTP client cannot
    /// be built.
    pub fn new(base: &str, headers: HeaderMap) -> Result<Self, ClientError> {
        Url::parse(base).map_err(|e| ClientError::InvalidUrl(format!("{base}: {e}")))?;
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(RestClientInner {
                client,
                base: base.trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// Absolute URL for `path` with `query` appended.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the result does not parse.
    pub fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ClientError> {
        let raw = format!("{}/{}", self.inner.base, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `RateLimited` on 429, `Status` on other non-success codes and
    /// `Parse` when the body does not decode into `T`.
    #[instrument(skip(self, query), fields(path = %path, cache = ?cache))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        cache: CachePolicy,
    ) -> Result<RestResponse<T>, ClientError> {
        let url = self.url(path, query)?;
        let key = url.to_string();

        if cache == CachePolicy::StaleWhileRevalidate
            && let Some(hit) = self.inner.cache.get(&key).await
        {
            debug!("Cache hit");
            return decode(&hit);
        }

        let response = self.inner.client.get(url).send().await?;
        let fetched = Arc::new(read_response(response).await?);
        let decoded = decode(&fetched)?;

        if cache == CachePolicy::StaleWhileRevalidate {
            self.inner.cache.insert(key, fetched).await;
        }

        Ok(decoded)
    }
}

async fn read_response(response: reqwest::Response) -> Result<CachedResponse, ClientError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(ClientError::RateLimited(retry_after));
    }

    let headers = response.headers().clone();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %excerpt(&body, 500),
            "REST endpoint returned non-success status"
        );
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: excerpt(&body, 200),
        });
    }

    Ok(CachedResponse { body, headers })
}

fn decode<T: DeserializeOwned>(response: &CachedResponse) -> Result<RestResponse<T>, ClientError> {
    let body = serde_json::from_str(&response.body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %excerpt(&response.body, 500),
            "Failed to parse REST response"
        );
        ClientError::Parse(e)
    })?;

    Ok(RestResponse {
        body,
        headers: response.headers.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::{Value, json};

    use super::*;

    fn client(server: &MockServer) -> RestClient {
        RestClient::new(&server.base_url(), HeaderMap::new()).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_url_building() {
        let client = RestClient::new("https://api.example.com/", HeaderMap::new()).unwrap();
        let url = client
            .url("/produtos", &params(&[("ids", "1,2"), ("q", "a b")]))
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/produtos?ids=1%2C2&q=a+b");

        let url = client.url("pagetype/shoes/boots", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/pagetype/shoes/boots");
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            RestClient::new("not a url", HeaderMap::new()),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_stale_get_is_cached() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/items").query_param("page", "1");
                then.status(200)
                    .header("resources", "0-11/40")
                    .json_body(json!([{"id": 1}]));
            })
            .await;

        let client = client(&server);
        let query = params(&[("page", "1")]);
        let first: RestResponse<Value> = client.get("/items", &query, STALE).await.unwrap();
        let second: RestResponse<Value> = client.get("/items", &query, STALE).await.unwrap();

        mock.assert_hits_async(1).await;
        assert_eq!(first.body, second.body);
        assert_eq!(second.headers.get("resources").unwrap(), "0-11/40");
    }

    #[tokio::test]
    async fn test_no_store_get_always_fetches() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/items");
                then.status(200).json_body(json!([]));
            })
            .await;

        let client = client(&server);
        for _ in 0..2 {
            let _: RestResponse<Value> = client
                .get("/items", &[], CachePolicy::NoStore)
                .await
                .unwrap();
        }

        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404).body("not here");
            })
            .await;

        let client = client(&server);
        for _ in 0..2 {
            let err = client
                .get::<Value>("/missing", &[], STALE)
                .await
                .unwrap_err();
            assert!(matches!(err, ClientError::Status { status: 404, .. }));
        }

        mock.assert_hits_async(2).await;
    }
}
