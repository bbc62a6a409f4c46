//! The flattened build order handed to the generator.
//!
//! A `BuildOrder` is the only surface the external project-file generator
//! consumes: artifacts dependency-first, each with its deduplicated link
//! list, plus the package-level module order.

use serde::{Deserialize, Serialize};

use crate::core::artifact::ArtifactKind;
use crate::core::module::ModuleId;
use crate::core::registry::Registry;
use crate::resolver::errors::ResolveError;
use crate::resolver::resolve::{module_order, resolve};
use crate::util::InternedString;

/// One artifact in the resolved order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildEntry {
    /// Artifact name
    pub artifact: InternedString,

    /// Artifact kind
    pub kind: ArtifactKind,

    /// Owning module
    pub module: InternedString,

    /// Link dependencies, deduplicated, in declaration order
    pub links: Vec<InternedString>,
}

/// The cycle-free build order for one root module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOrder {
    /// Root module name
    pub root: InternedString,

    /// Artifacts, dependencies before dependents
    pub artifacts: Vec<BuildEntry>,

    /// Modules at package level, dependencies before dependents
    pub modules: Vec<InternedString>,
}

impl BuildOrder {
    /// Resolve `root` and flatten the result for emission.
    pub fn for_module(registry: &Registry, root: ModuleId) -> Result<Self, ResolveError> {
        let artifact_order = resolve(registry, root)?;
        let modules = module_order(registry, root)?
            .into_iter()
            .map(|id| registry.module(id).name())
            .collect();

        let artifacts = artifact_order
            .into_iter()
            .map(|id| {
                let artifact = registry.artifact(id);

                // Repeat declarations collapse to one linkage.
                let mut links: Vec<InternedString> = Vec::new();
                for &dep in artifact.dependencies() {
                    let name = registry.artifact(dep).name();
                    if !links.contains(&name) {
                        links.push(name);
                    }
                }

                BuildEntry {
                    artifact: artifact.name(),
                    kind: artifact.kind(),
                    module: registry.module(artifact.owner()).name(),
                    links,
                }
            })
            .collect();

        Ok(BuildOrder {
            root: registry.module(root).name(),
            artifacts,
            modules,
        })
    }

    /// Artifact names in build order.
    pub fn artifact_names(&self) -> Vec<&str> {
        self.artifacts.iter().map(|e| e.artifact.as_str()).collect()
    }

    /// Number of artifacts in the order.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the order is empty (an aggregation-only root).
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
