//! Resolution error types and diagnostics.

use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error during build-order resolution.
///
/// Both variants are fatal for the affected root: no partial build plan is
/// emitted, and the offending names are carried verbatim so the
/// configuration author can fix the declaration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The artifact dependency graph contains a cycle. The path runs from
    /// the root artifact down through the repeated node.
    #[error("dependency cycle: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// Package-level module edges are cyclic.
    #[error("module dependency cycle among: {}", .modules.join(", "))]
    ModuleCycle { modules: Vec<String> },
}

impl ResolveError {
    /// Convert to a user-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::CycleDetected { path } => {
                Diagnostic::error("cycle detected in artifact dependency graph")
                    .with_context(format!("cycle: {}", path.join(" -> ")))
                    .with_suggestion("Break the cycle by removing or restructuring dependencies")
            }
            ResolveError::ModuleCycle { modules } => {
                Diagnostic::error("cycle detected among module dependencies")
                    .with_context(format!("involved modules: {}", modules.join(", ")))
                    .with_suggestion("Break the cycle by removing or restructuring dependencies")
            }
        }
    }
}
