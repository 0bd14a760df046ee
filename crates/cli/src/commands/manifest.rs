//! `ca-cli manifest`.

use std::fmt::Write as _;
use std::io::Write as _;

use commerce_apps::manifest::Manifest;
use commerce_apps::{AppsConfig, Registry};

use super::CommandError;

/// Print the loaders and actions of every configured app.
///
/// # Errors
///
/// Returns an error if a vendor client cannot be built or stdout fails.
pub fn list(config: &AppsConfig) -> Result<(), CommandError> {
    let registry = Registry::from_config(config)?;
    let manifests = registry.manifests();
    if manifests.is_empty() {
        tracing::warn!("No apps configured");
    }

    std::io::stdout().lock().write_all(render(&manifests).as_bytes())?;
    Ok(())
}

fn render(manifests: &[&Manifest]) -> String {
    let mut out = String::new();
    for manifest in manifests {
        let _ = writeln!(out, "{}", manifest.name);
        for (label, keys) in [("loaders", manifest.loaders), ("actions", manifest.actions)] {
            if keys.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {label}:");
            for key in keys {
                let _ = writeln!(out, "    {key}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_skips_empty_sections() {
        let out = render(&[&commerce_apps::vtex::MANIFEST]);
        assert!(out.starts_with("vtex\n  loaders:\n"));
        assert!(out.contains("    vtex/loaders/legacy/productList.ts\n"));
        assert!(!out.contains("actions:"));
    }

    #[test]
    fn test_render_lists_actions() {
        let out = render(&[&commerce_apps::wake::MANIFEST]);
        assert!(out.contains("  actions:\n    wake/actions/cart/addItem.ts\n"));
    }
}
