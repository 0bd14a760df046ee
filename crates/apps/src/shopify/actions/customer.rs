//! Customer creation through the Admin API (newsletter sign-up).

use serde::Deserialize;
use tracing::instrument;

use crate::client::{ClientError, GraphqlRequest};
use crate::context::InvokeContext;
use crate::error::Result;
use crate::shopify::Shopify;
use crate::shopify::cart::user_error_message;
use crate::shopify::queries::CREATE_CUSTOMER;
use crate::shopify::types::{Customer, CustomerInput, CustomerPayloadData, InputVariables};

#[derive(Debug, Clone, Deserialize)]
pub struct Props {
    pub input: CustomerInput,
}

/// Create a customer; returns `None` when Shopify created nothing.
///
/// # Errors
///
/// `UserError` when Shopify rejects the input (e.g. a taken email), or the
/// client error of the mutation.
#[instrument(skip_all)]
pub async fn create_customer(
    shopify: &Shopify,
    props: Props,
    _ctx: &mut InvokeContext,
) -> Result<Option<Customer>> {
    let data: CustomerPayloadData = shopify
        .admin
        .query(GraphqlRequest::new(
            CREATE_CUSTOMER,
            &[],
            InputVariables { input: props.input },
        ))
        .await?;

    let Some(payload) = data.payload else {
        return Ok(None);
    };
    if !payload.user_errors.is_empty() {
        return Err(ClientError::UserError(user_error_message(&payload.user_errors)).into());
    }
    Ok(payload.customer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderMap;
    use httpmock::prelude::*;
    use secrecy::SecretString;
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::config::ShopifyConfig;

    #[tokio::test]
    async fn test_create_customer_uses_admin_api() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/admin/api/graphql.json")
                .header("x-shopify-access-token", "admin-token")
                .body_contains("customerCreate")
                .body_contains(r#""marketingState":"SUBSCRIBED""#);
            then.status(200).json_body(json!({
                "data": {"payload": {
                    "customer": {"id": "gid://shopify/Customer/7", "email": "a@example.com", "tags": ["newsletter"]},
                    "userErrors": []
                }}
            }));
        });

        let mut config = ShopifyConfig::new("acme", SecretString::from("sf-token"));
        config.admin_access_token = Some(SecretString::from("admin-token"));
        config.storefront_endpoint = server.url("/api/graphql.json");
        config.admin_endpoint = server.url("/admin/api/graphql.json");
        let shopify = Shopify::new(&config).unwrap();

        let props: Props = serde_json::from_value(json!({
            "input": {
                "email": "a@example.com",
                "emailMarketingConsent": {"marketingState": "SUBSCRIBED"},
                "tags": ["newsletter"]
            }
        }))
        .unwrap();
        let mut ctx = InvokeContext::new(Url::parse("https://shop.example.com/").unwrap(), HeaderMap::new());

        let customer = create_customer(&shopify, props, &mut ctx).await.unwrap().unwrap();
        mock.assert();
        assert_eq!(customer.id, "gid://shopify/Customer/7");
        assert_eq!(customer.tags, vec!["newsletter"]);
    }
}
