//! The package registry - one generation run's worth of modules.
//!
//! The registry owns every `Module` and `Artifact`; they refer to each
//! other only by id, so the dependency graph can share nodes freely
//! without ownership cycles. Callers pass the registry explicitly rather
//! than going through process-wide state, so independent generation runs
//! (and tests) do not interfere.
//!
//! Registration is monotonic: modules are only ever added, never removed,
//! and registering an existing name returns the original instance. The
//! registry is single-threaded by design - registration order is
//! meaningful and must not race.

use std::collections::HashMap;

use thiserror::Error;

use crate::core::artifact::{Artifact, ArtifactId, ArtifactKind};
use crate::core::module::{Module, ModuleId};
use crate::util::diagnostic::Diagnostic;
use crate::util::InternedString;

/// Errors raised while declaring modules, artifacts, and edges.
///
/// All are synchronous configuration errors: the declaration is wrong and
/// the run for the affected root cannot proceed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("module not found: `{0}`")]
    ModuleNotFound(InternedString),

    #[error("module `{0}` has no main library")]
    NoMainLibrary(InternedString),

    #[error("module name cannot be empty")]
    EmptyModuleName,

    #[error("duplicate artifact name `{artifact}` in module `{module}`")]
    DuplicateArtifactName {
        module: InternedString,
        artifact: InternedString,
    },

    #[error("artifact `{0}` cannot depend on itself")]
    SelfDependency(InternedString),

    #[error("module `{module}` requires `{dependency}`, which is not registered")]
    MissingDependency {
        module: InternedString,
        dependency: InternedString,
    },
}

impl RegistryError {
    /// Convert to a user-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RegistryError::ModuleNotFound(name) => {
                Diagnostic::error(format!("could not find module `{}`", name))
                    .with_suggestion("Check that the module name is spelled correctly")
            }
            RegistryError::NoMainLibrary(name) => {
                Diagnostic::error(format!("module `{}` has no main library", name))
                    .with_context("only modules with a main library can be linked against")
            }
            RegistryError::EmptyModuleName => Diagnostic::error("module name cannot be empty"),
            RegistryError::DuplicateArtifactName { module, artifact } => Diagnostic::error(
                format!("module `{}` declares artifact `{}` twice", module, artifact),
            )
            .with_suggestion("Rename one of the artifacts"),
            RegistryError::SelfDependency(artifact) => {
                Diagnostic::error(format!("artifact `{}` cannot depend on itself", artifact))
            }
            RegistryError::MissingDependency { module, dependency } => Diagnostic::error(format!(
                "module `{}` requires `{}`, which is not registered",
                module, dependency
            ))
            .with_suggestion(format!("Register `{}` before building `{}`", dependency, module)),
        }
    }
}

/// The store mapping module names to descriptors for one generation run.
#[derive(Debug, Clone)]
pub struct Registry {
    modules: Vec<Module>,
    artifacts: Vec<Artifact>,
    by_name: HashMap<InternedString, ModuleId>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry {
            modules: Vec::new(),
            artifacts: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a module by name, get-or-create.
    ///
    /// If a module with this name already exists it is returned unchanged,
    /// organization included, so two dependents can never instantiate
    /// divergent copies of a shared dependency.
    pub fn register(
        &mut self,
        name: impl AsRef<str>,
        organization: impl AsRef<str>,
    ) -> Result<ModuleId, RegistryError> {
        let name = InternedString::new(name);
        if name.is_empty() {
            return Err(RegistryError::EmptyModuleName);
        }

        if let Some(&existing) = self.by_name.get(&name) {
            tracing::debug!(module = %name, "module already registered, reusing");
            return Ok(existing);
        }

        let id = ModuleId(self.modules.len() as u32);
        self.modules
            .push(Module::new(id, name, InternedString::new(organization)));
        self.by_name.insert(name, id);
        tracing::debug!(module = %name, "registered module");

        Ok(id)
    }

    /// Look up a registered module by name.
    pub fn lookup(&self, name: &str) -> Result<ModuleId, RegistryError> {
        let name = InternedString::new(name);
        self.by_name
            .get(&name)
            .copied()
            .ok_or(RegistryError::ModuleNotFound(name))
    }

    /// Whether a module with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&InternedString::new(name))
    }

    /// The main library a dependent must link against.
    pub fn main_library_of(&self, name: &str) -> Result<ArtifactId, RegistryError> {
        let id = self.lookup(name)?;
        let module = self.module(id);
        module
            .main_library()
            .ok_or(RegistryError::NoMainLibrary(module.name()))
    }

    /// Get a module by id.
    ///
    /// Ids are only minted by this registry, so the access is infallible.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    /// Get an artifact by id.
    pub fn artifact(&self, id: ArtifactId) -> &Artifact {
        &self.artifacts[id.index()]
    }

    /// Iterate over all modules in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Iterate over all artifacts in registration order.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of registered artifacts.
    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Create an artifact owned by `owner`.
    ///
    /// Artifact names must be unique within their module; the owner is
    /// fixed here and never changes.
    pub fn add_artifact(
        &mut self,
        owner: ModuleId,
        kind: ArtifactKind,
        name: impl AsRef<str>,
    ) -> Result<ArtifactId, RegistryError> {
        let name = InternedString::new(name);

        let module = self.module(owner);
        for &existing in module.artifacts() {
            if self.artifacts[existing.index()].name() == name {
                return Err(RegistryError::DuplicateArtifactName {
                    module: module.name(),
                    artifact: name,
                });
            }
        }

        let id = ArtifactId(self.artifacts.len() as u32);
        self.artifacts.push(Artifact::new(id, kind, name, owner));
        self.modules[owner.index()].push_artifact(id);
        tracing::debug!(artifact = %name, kind = %kind, module = %self.module(owner).name(), "created artifact");

        Ok(id)
    }

    /// Record that `dependent` links against `dependency`.
    ///
    /// Edges are stored in declaration order; repeat declarations are
    /// tolerated and collapsed at resolution time. Self-loops are rejected.
    pub fn add_dependency(
        &mut self,
        dependent: ArtifactId,
        dependency: ArtifactId,
    ) -> Result<(), RegistryError> {
        if dependent == dependency {
            return Err(RegistryError::SelfDependency(self.artifact(dependent).name()));
        }
        self.artifacts[dependent.index()].push_dependency(dependency);
        Ok(())
    }

    /// Record a package-level dependency between modules.
    pub fn add_child(&mut self, parent: ModuleId, child: ModuleId) {
        self.modules[parent.index()].push_child(child);
    }

    pub(crate) fn set_main_library(&mut self, module: ModuleId, artifact: ArtifactId) {
        self.modules[module.index()].set_main_library(artifact);
    }

    pub(crate) fn set_test_artifact(&mut self, module: ModuleId, artifact: ArtifactId) {
        self.modules[module.index()].set_test_artifact(artifact);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
