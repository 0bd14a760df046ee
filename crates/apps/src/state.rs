//! Application state shared across handlers.

use std::sync::Arc;

use crate::client::ClientError;
use crate::config::AppsConfig;
use crate::manifest::Registry;

/// Application state shared across all handlers.
///
/// Cloning is cheap: everything sits behind one `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: AppsConfig,
    registry: Registry,
}

impl AppState {
    /// Build the state, constructing every configured app.
    ///
    /// # Errors
    ///
    /// Returns an error if a vendor client cannot be built.
    pub fn new(config: AppsConfig) -> Result<Self, ClientError> {
        let registry = Registry::from_config(&config)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Build the state around an already-constructed registry.
    #[must_use]
    pub fn with_registry(config: AppsConfig, registry: Registry) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, registry }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppsConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }
}
