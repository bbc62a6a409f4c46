//! Module descriptors.

use std::fmt;

use crate::core::artifact::ArtifactId;
use crate::util::InternedString;

/// Identifier of a module within one registry, assigned in registration
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) u32);

impl ModuleId {
    /// Index into the owning registry's module arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named configuration unit that owns build artifacts and may declare
/// other modules as package-level dependencies.
///
/// A module without a main library is legal: it exists purely to aggregate
/// children.
#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    name: InternedString,
    organization: InternedString,
    main_library: Option<ArtifactId>,
    test_artifact: Option<ArtifactId>,
    artifacts: Vec<ArtifactId>,
    children: Vec<ModuleId>,
}

impl Module {
    pub(crate) fn new(id: ModuleId, name: InternedString, organization: InternedString) -> Self {
        Module {
            id,
            name,
            organization,
            main_library: None,
            test_artifact: None,
            artifacts: Vec::new(),
            children: Vec::new(),
        }
    }

    /// This module's id.
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// The module name, unique within the registry.
    pub fn name(&self) -> InternedString {
        self.name
    }

    /// The organization/path string identifying where the module lives.
    pub fn organization(&self) -> InternedString {
        self.organization
    }

    /// The library dependents link against, if the module has one.
    pub fn main_library(&self) -> Option<ArtifactId> {
        self.main_library
    }

    /// The unit-test executable, if the module has one.
    pub fn test_artifact(&self) -> Option<ArtifactId> {
        self.test_artifact
    }

    /// All artifacts this module owns, in creation order.
    pub fn artifacts(&self) -> &[ArtifactId] {
        &self.artifacts
    }

    /// Package-level dependencies in declaration order.
    pub fn children(&self) -> &[ModuleId] {
        &self.children
    }

    pub(crate) fn push_artifact(&mut self, artifact: ArtifactId) {
        self.artifacts.push(artifact);
    }

    /// Designate the main library. The first designation wins; later calls
    /// are ignored so repeated get-package requests stay idempotent.
    pub(crate) fn set_main_library(&mut self, artifact: ArtifactId) {
        if self.main_library.is_none() {
            self.main_library = Some(artifact);
        }
    }

    /// Designate the test executable. First designation wins.
    pub(crate) fn set_test_artifact(&mut self, artifact: ArtifactId) {
        if self.test_artifact.is_none() {
            self.test_artifact = Some(artifact);
        }
    }

    /// Record a package-level child. Repeat declarations are dropped.
    pub(crate) fn push_child(&mut self, child: ModuleId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
