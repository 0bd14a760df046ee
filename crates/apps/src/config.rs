//! Adapter configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Server
//! - `APPS_HOST` - Bind address (default: 127.0.0.1)
//! - `APPS_PORT` - Listen port (default: 8000)
//! - `APPS_BASE_URL` - Public storefront origin used to build page URLs
//!   (default: `http://localhost:8000`)
//!
//! ## Shopify (enabled when `SHOPIFY_STORE_NAME` is set)
//! - `SHOPIFY_STORE_NAME` - Store handle (`{name}.myshopify.com`)
//! - `SHOPIFY_STOREFRONT_ACCESS_TOKEN` - Storefront API access token (required)
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token
//! - `SHOPIFY_API_VERSION` - API version (default: 2023-07)
//! - `SHOPIFY_STOREFRONT_ENDPOINT` / `SHOPIFY_ADMIN_ENDPOINT` - Endpoint overrides
//!
//! ## VTEX (enabled when `VTEX_ACCOUNT` is set)
//! - `VTEX_ACCOUNT` - Account name
//! - `VTEX_ENVIRONMENT` - Environment (default: vtexcommercestable)
//! - `VTEX_SALES_CHANNEL` - Sales channel (default: 1)
//! - `VTEX_BASE_URL` - Base URL override
//!
//! ## Wake (enabled when `WAKE_STOREFRONT_TOKEN` is set)
//! - `WAKE_STOREFRONT_TOKEN` - Storefront GraphQL access token
//! - `WAKE_API_TOKEN` - REST API basic token (default: deco)
//! - `WAKE_API_BASE_URL` - REST API origin (default: `https://api.fbits.net`)
//! - `WAKE_STOREFRONT_ENDPOINT` - GraphQL endpoint
//!   (default: `https://storefront-api.fbits.net/graphql`)
//!
//! ## Error tracking
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`,
//!   `SENTRY_TRACES_SAMPLE_RATE`

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

pub const DEFAULT_SHOPIFY_API_VERSION: &str = "2023-07";
pub const DEFAULT_VTEX_ENVIRONMENT: &str = "vtexcommercestable";
pub const DEFAULT_WAKE_API_BASE_URL: &str = "https://api.fbits.net";
pub const DEFAULT_WAKE_STOREFRONT_ENDPOINT: &str = "https://storefront-api.fbits.net/graphql";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Top-level configuration for the adapter host.
#[derive(Debug, Clone)]
pub struct AppsConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public storefront origin
    pub base_url: String,
    pub shopify: Option<ShopifyConfig>,
    pub vtex: Option<VtexConfig>,
    pub wake: Option<WakeConfig>,
    pub sentry: SentryConfig,
}

/// Shopify Storefront and Admin API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Store handle, without `.myshopify.com`
    pub store_name: String,
    pub api_version: String,
    pub storefront_access_token: SecretString,
    /// Admin token; admin calls go out with an empty token when unset
    pub admin_access_token: Option<SecretString>,
    pub storefront_endpoint: String,
    pub admin_endpoint: String,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("store_name", &self.store_name)
            .field("api_version", &self.api_version)
            .field("storefront_access_token", &"[REDACTED]")
            .field(
                "admin_access_token",
                &self.admin_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("storefront_endpoint", &self.storefront_endpoint)
            .field("admin_endpoint", &self.admin_endpoint)
            .finish()
    }
}

impl ShopifyConfig {
    /// Build a configuration with the default myshopify.com endpoints.
    #[must_use]
    pub fn new(store_name: &str, storefront_access_token: SecretString) -> Self {
        let api_version = DEFAULT_SHOPIFY_API_VERSION.to_string();
        Self {
            storefront_endpoint: storefront_endpoint(store_name, &api_version),
            admin_endpoint: admin_endpoint(store_name, &api_version),
            store_name: store_name.to_string(),
            api_version,
            storefront_access_token,
            admin_access_token: None,
        }
    }
}

/// VTEX account configuration. Carries no secrets: the legacy catalog API is
/// public.
#[derive(Debug, Clone)]
pub struct VtexConfig {
    pub account: String,
    pub environment: String,
    pub sales_channel: String,
    pub base_url: String,
}

impl VtexConfig {
    #[must_use]
    pub fn new(account: &str) -> Self {
        Self {
            base_url: vtex_base_url(account, DEFAULT_VTEX_ENVIRONMENT),
            account: account.to_string(),
            environment: DEFAULT_VTEX_ENVIRONMENT.to_string(),
            sales_channel: "1".to_string(),
        }
    }
}

/// Wake Storefront and REST API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct WakeConfig {
    pub storefront_token: SecretString,
    pub api_token: SecretString,
    pub api_base_url: String,
    pub storefront_endpoint: String,
}

impl std::fmt::Debug for WakeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WakeConfig")
            .field("storefront_token", &"[REDACTED]")
            .field("api_token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("storefront_endpoint", &self.storefront_endpoint)
            .finish()
    }
}

impl WakeConfig {
    #[must_use]
    pub fn new(storefront_token: SecretString) -> Self {
        Self {
            storefront_token,
            api_token: SecretString::from("deco"),
            api_base_url: DEFAULT_WAKE_API_BASE_URL.to_string(),
            storefront_endpoint: DEFAULT_WAKE_STOREFRONT_ENDPOINT.to_string(),
        }
    }
}

/// Sentry settings.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.1,
        }
    }
}

impl AppsConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, a required variable of
    /// an enabled app is missing, or a secret looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("APPS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("APPS_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("APPS_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("APPS_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("APPS_BASE_URL", "http://localhost:8000");
        url::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("APPS_BASE_URL".to_string(), e.to_string()))?;

        Ok(Self {
            host,
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
            shopify: ShopifyConfig::from_env()?,
            vtex: VtexConfig::from_env(),
            wake: WakeConfig::from_env()?,
            sentry: SentryConfig::from_env()?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(store_name) = get_optional_env("SHOPIFY_STORE_NAME") else {
            return Ok(None);
        };
        let api_version = get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_SHOPIFY_API_VERSION);

        Ok(Some(Self {
            storefront_endpoint: get_optional_env("SHOPIFY_STOREFRONT_ENDPOINT")
                .unwrap_or_else(|| storefront_endpoint(&store_name, &api_version)),
            admin_endpoint: get_optional_env("SHOPIFY_ADMIN_ENDPOINT")
                .unwrap_or_else(|| admin_endpoint(&store_name, &api_version)),
            storefront_access_token: get_validated_secret("SHOPIFY_STOREFRONT_ACCESS_TOKEN")?,
            admin_access_token: get_optional_secret("SHOPIFY_ADMIN_ACCESS_TOKEN")?,
            store_name,
            api_version,
        }))
    }
}

impl VtexConfig {
    fn from_env() -> Option<Self> {
        let account = get_optional_env("VTEX_ACCOUNT")?;
        let environment = get_env_or_default("VTEX_ENVIRONMENT", DEFAULT_VTEX_ENVIRONMENT);

        Some(Self {
            base_url: get_optional_env("VTEX_BASE_URL")
                .unwrap_or_else(|| vtex_base_url(&account, &environment)),
            sales_channel: get_env_or_default("VTEX_SALES_CHANNEL", "1"),
            account,
            environment,
        })
    }
}

impl WakeConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        if get_optional_env("WAKE_STOREFRONT_TOKEN").is_none() {
            return Ok(None);
        }

        Ok(Some(Self {
            storefront_token: get_validated_secret("WAKE_STOREFRONT_TOKEN")?,
            api_token: get_optional_secret("WAKE_API_TOKEN")?
                .unwrap_or_else(|| SecretString::from("deco")),
            api_base_url: get_env_or_default("WAKE_API_BASE_URL", DEFAULT_WAKE_API_BASE_URL),
            storefront_endpoint: get_env_or_default(
                "WAKE_STOREFRONT_ENDPOINT",
                DEFAULT_WAKE_STOREFRONT_ENDPOINT,
            ),
        }))
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: get_rate("SENTRY_SAMPLE_RATE", defaults.sample_rate)?,
            traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", defaults.traces_sample_rate)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn storefront_endpoint(store_name: &str, api_version: &str) -> String {
    format!("https://{store_name}.myshopify.com/api/{api_version}/graphql.json")
}

fn admin_endpoint(store_name: &str, api_version: &str) -> String {
    format!("https://{store_name}.myshopify.com/admin/api/{api_version}/graphql.json")
}

fn vtex_base_url(account: &str, environment: &str) -> String {
    format!("https://{account}.{environment}.com.br")
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse a sample rate in `0.0..=1.0`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Reject secrets that are obviously placeholders.
fn validate_secret(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret(&value, key)?;
    Ok(SecretString::from(value))
}

fn get_optional_secret(key: &str) -> Result<Option<SecretString>, ConfigError> {
    get_optional_env(key)
        .map(|value| {
            validate_secret(&value, key)?;
            Ok(SecretString::from(value))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_placeholder() {
        let result = validate_secret("your-token-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_changeme() {
        assert!(validate_secret("CHANGEME", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_valid() {
        assert!(validate_secret("shpat_4f9c2a7e1b", "TEST_VAR").is_ok());
        // Wake's documented default token is a plain word
        assert!(validate_secret("deco", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_default_endpoints() {
        let config = ShopifyConfig::new("acme", SecretString::from("token"));
        assert_eq!(
            config.storefront_endpoint,
            "https://acme.myshopify.com/api/2023-07/graphql.json"
        );
        assert_eq!(
            config.admin_endpoint,
            "https://acme.myshopify.com/admin/api/2023-07/graphql.json"
        );

        let vtex = VtexConfig::new("store");
        assert_eq!(vtex.base_url, "https://store.vtexcommercestable.com.br");
        assert_eq!(vtex.sales_channel, "1");
    }

    #[test]
    fn test_socket_addr() {
        let config = AppsConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            base_url: "http://localhost:8000".to_string(),
            shopify: None,
            vtex: None,
            wake: None,
            sentry: SentryConfig::default(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut shopify = ShopifyConfig::new("acme", SecretString::from("storefront_secret_value"));
        shopify.admin_access_token = Some(SecretString::from("admin_secret_value"));
        let wake = WakeConfig::new(SecretString::from("wake_secret_value"));

        let debug_output = format!("{shopify:?} {wake:?}");

        assert!(debug_output.contains("acme"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("storefront_secret_value"));
        assert!(!debug_output.contains("admin_secret_value"));
        assert!(!debug_output.contains("wake_secret_value"));
    }
}
