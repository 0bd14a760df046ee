//! Block registry: invoke loaders and actions by manifest key.
//!
//! Keys look like `"wake/actions/cart/addItem.ts"`: the first path segment
//! names the app, the second the block kind.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::client::ClientError;
use crate::config::AppsConfig;
use crate::context::InvokeContext;
use crate::error::{AppError, Result};
use crate::shopify::Shopify;
use crate::vtex::Vtex;
use crate::wake::Wake;

/// Loaders read, actions mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Loader,
    Action,
}

/// The blocks one app exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub name: &'static str,
    pub loaders: &'static [&'static str],
    pub actions: &'static [&'static str],
}

impl Manifest {
    /// Kind of the block registered under `key`, if any.
    #[must_use]
    pub fn kind_of(&self, key: &str) -> Option<BlockKind> {
        if self.loaders.contains(&key) {
            Some(BlockKind::Loader)
        } else if self.actions.contains(&key) {
            Some(BlockKind::Action)
        } else {
            None
        }
    }

    /// Every key, loaders first.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.loaders.iter().chain(self.actions.iter()).copied()
    }
}

/// One entry of a batch invoke.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeRequest {
    pub key: String,
    #[serde(default)]
    pub props: Value,
}

/// Decode block props. `null` reads as `{}` so all-default props can be omitted.
///
/// # Errors
///
/// Returns `AppError::InvalidProps` when the value does not fit `P`.
pub fn props<P: DeserializeOwned>(value: Value) -> Result<P> {
    let value = if value.is_null() {
        Value::Object(Map::new())
    } else {
        value
    };
    Ok(serde_json::from_value(value)?)
}

/// Encode a block's output.
///
/// # Errors
///
/// Returns `AppError::Internal` when the output cannot be serialized.
pub fn output<O: Serialize>(value: O) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(format!("serialize output: {e}")))
}

/// Configured apps, addressable by block key.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub shopify: Option<Shopify>,
    pub vtex: Option<Vtex>,
    pub wake: Option<Wake>,
}

impl Registry {
    /// Build every app enabled in the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a vendor client cannot be built.
    pub fn from_config(config: &AppsConfig) -> std::result::Result<Self, ClientError> {
        Ok(Self {
            shopify: config.shopify.as_ref().map(Shopify::new).transpose()?,
            vtex: config.vtex.as_ref().map(Vtex::new).transpose()?,
            wake: config.wake.as_ref().map(Wake::new).transpose()?,
        })
    }

    /// Manifests of the configured apps.
    #[must_use]
    pub fn manifests(&self) -> Vec<&'static Manifest> {
        let mut manifests = Vec::new();
        if self.shopify.is_some() {
            manifests.push(&crate::shopify::MANIFEST);
        }
        if self.vtex.is_some() {
            manifests.push(&crate::vtex::MANIFEST);
        }
        if self.wake.is_some() {
            manifests.push(&crate::wake::MANIFEST);
        }
        manifests
    }

    /// Run the block registered under `key`.
    ///
    /// # Errors
    ///
    /// `UnknownBlock` for keys no app knows, `AppNotInstalled` when the app is
    /// not configured, `InvalidProps` when props do not fit, or whatever the
    /// block itself fails with.
    #[instrument(skip(self, props, ctx), fields(key = %key))]
    pub async fn invoke(&self, key: &str, props: Value, ctx: &mut InvokeContext) -> Result<Value> {
        let app = key.split('/').next().unwrap_or_default();
        crate::error::add_breadcrumb("invoke", key);

        match app {
            "shopify" => {
                let shopify = self.shopify.as_ref().ok_or_else(|| not_installed(app))?;
                shopify.invoke(key, props, ctx).await
            }
            "vtex" => {
                let vtex = self.vtex.as_ref().ok_or_else(|| not_installed(app))?;
                vtex.invoke(key, props, ctx).await
            }
            "wake" => {
                let wake = self.wake.as_ref().ok_or_else(|| not_installed(app))?;
                wake.invoke(key, props, ctx).await
            }
            _ => Err(AppError::UnknownBlock(key.to_string())),
        }
    }

    /// Run several blocks concurrently, returning `{name: output}`.
    ///
    /// Each entry gets its own response headers; they are merged into `ctx`
    /// once every entry has succeeded.
    ///
    /// # Errors
    ///
    /// Fails with the first error any entry produces.
    #[instrument(skip(self, batch, ctx), fields(entries = batch.len()))]
    pub async fn invoke_batch(
        &self,
        batch: BTreeMap<String, InvokeRequest>,
        ctx: &mut InvokeContext,
    ) -> Result<Map<String, Value>> {
        let parent = &*ctx;
        let results = try_join_all(batch.into_iter().map(|(name, request)| async move {
            let mut entry_ctx = parent.fork();
            let value = self.invoke(&request.key, request.props, &mut entry_ctx).await?;
            Ok::<_, AppError>((name, value, entry_ctx.response_headers))
        }))
        .await?;

        let mut out = Map::new();
        for (name, value, headers) in results {
            ctx.merge_response_headers(headers);
            out.insert(name, value);
        }
        Ok(out)
    }
}

fn not_installed(app: &str) -> AppError {
    AppError::AppNotInstalled(app.to_string())
}
