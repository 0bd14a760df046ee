//! The storefront's installed-app list.

use serde::Serialize;

/// An installed app: where it lives and what it is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppEntry {
    pub dir: String,
    pub name: String,
}

/// An app that lives in a directory named after itself.
#[must_use]
pub fn app(name: &str) -> AppEntry {
    AppEntry {
        dir: name.to_string(),
        name: name.to_string(),
    }
}

/// Apps kept for sites built on the previous framework generation.
#[must_use]
pub fn compatibility_apps() -> Vec<AppEntry> {
    vec![
        AppEntry {
            dir: "./compat/$live".to_string(),
            name: "$live".to_string(),
        },
        AppEntry {
            dir: "./compat/std".to_string(),
            name: "deco-sites/std".to_string(),
        },
    ]
}

/// Every installed app, in load order.
#[must_use]
pub fn installed_apps() -> Vec<AppEntry> {
    let mut apps = vec![
        AppEntry {
            dir: "admin".to_string(),
            name: "deco-sites/admin".to_string(),
        },
        app("handlebars"),
        app("vtex"),
        app("vnda"),
        app("shopify"),
        app("website"),
        app("commerce"),
        app("workflows"),
        app("decohub"),
    ];
    apps.extend(compatibility_apps());
    apps
}
