//! High-level operations composed from the core and resolver.

use anyhow::{Context, Result};

use crate::core::registry::Registry;
use crate::resolver::plan::BuildOrder;

/// Resolve `root` and serialize its build order as pretty JSON.
///
/// This is the hand-off point to the external project-file generator:
/// one document per root, dependencies first, or an error naming the
/// offending modules and artifacts.
pub fn emit_build_order(registry: &Registry, root: &str) -> Result<String> {
    let module = registry
        .lookup(root)
        .with_context(|| format!("unknown root module `{}`", root))?;

    let order = BuildOrder::for_module(registry, module)
        .with_context(|| format!("failed to resolve build order for `{}`", root))?;

    serde_json::to_string_pretty(&order).context("failed to serialize build order")
}
