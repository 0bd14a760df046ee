//! GraphQL transport.

use std::sync::Arc;

use graphql_client::Response;
use reqwest::header::HeaderMap;
use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;

use super::{ClientError, GraphQLError, excerpt};

/// A GraphQL operation: the document, the fragments it spreads, and its
/// variables.
#[derive(Debug, Clone)]
pub struct GraphqlRequest<'a, V> {
    pub query: &'a str,
    pub fragments: &'a [&'a str],
    pub variables: V,
}

impl<'a, V> GraphqlRequest<'a, V> {
    pub const fn new(query: &'a str, fragments: &'a [&'a str], variables: V) -> Self {
        Self {
            query,
            fragments,
            variables,
        }
    }

    /// Full document: the operation followed by each fragment.
    #[must_use]
    pub fn document(&self) -> String {
        std::iter::once(self.query)
            .chain(self.fragments.iter().copied())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Serialize)]
struct RequestBody<'a, V> {
    query: String,
    variables: &'a V,
}

/// Client for one GraphQL endpoint.
#[derive(Clone)]
pub struct GraphqlClient {
    inner: Arc<GraphqlClientInner>,
}

struct GraphqlClientInner {
    client: reqwest::Client,
    endpoint: String,
}

impl std::fmt::Debug for GraphqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("endpoint", &self.inner.endpoint)
            .finish_non_exhaustive()
    }
}

impl GraphqlClient {
    /// Create a client that sends `headers` with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(endpoint: &str, headers: HeaderMap) -> Result<Self, ClientError> {
        url::Url::parse(endpoint).map_err(|e| ClientError::InvalidUrl(format!("{endpoint}: {e}")))?;
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(GraphqlClientInner {
                client,
                endpoint: endpoint.to_string(),
            }),
        })
    }

    /// Execute a query or mutation and return its `data`.
    ///
    /// # Errors
    ///
    /// Returns `RateLimited` on 429, `Status` on other non-success codes,
    /// `Parse` when the body is not a GraphQL response, and `GraphQL` when the
    /// response carries errors or no data.
    #[instrument(skip(self, request), fields(endpoint = %self.inner.endpoint))]
    pub async fn query<T, V>(&self, request: GraphqlRequest<'_, V>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        V: Serialize + Send + Sync,
    {
        let body = RequestBody {
            query: request.document(),
            variables: &request.variables,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

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

        // Read as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&response_text, 500),
                "GraphQL endpoint returned non-success status"
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: excerpt(&response_text, 200),
            });
        }

        let response: Response<T> = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&response_text, 500),
                "Failed to parse GraphQL response"
            );
            ClientError::Parse(e)
        })?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ClientError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %excerpt(&response_text, 500),
                "GraphQL response has no data and no errors"
            );
            ClientError::graphql("No data in response")
        })
    }
}
