//! Artifacts - the concrete buildable targets a module owns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::module::ModuleId;
use crate::util::InternedString;

/// Identifier of an artifact within one registry.
///
/// Ids are assigned in registration order, which is what makes the
/// resolver's tie-breaking deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId(pub(crate) u32);

impl ArtifactId {
    /// Index into the owning registry's artifact arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The closed set of buildable target kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A library other artifacts link against.
    Library,
    /// A linked executable, e.g. a unit-test runner.
    Executable,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Library => write!(f, "library"),
            ArtifactKind::Executable => write!(f, "executable"),
        }
    }
}

/// A named build target belonging to exactly one module.
///
/// The owning module is fixed at construction. Dependency edges are kept
/// in declaration order; repeated declarations are stored as declared and
/// collapsed at resolution time so they never duplicate linkage.
#[derive(Debug, Clone)]
pub struct Artifact {
    id: ArtifactId,
    kind: ArtifactKind,
    name: InternedString,
    owner: ModuleId,
    dependencies: Vec<ArtifactId>,
}

impl Artifact {
    pub(crate) fn new(id: ArtifactId, kind: ArtifactKind, name: InternedString, owner: ModuleId) -> Self {
        Artifact {
            id,
            kind,
            name,
            owner,
            dependencies: Vec::new(),
        }
    }

    /// This artifact's id.
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    /// The artifact kind.
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// The artifact name, unique within its owning module.
    pub fn name(&self) -> InternedString {
        self.name
    }

    /// The module this artifact belongs to.
    pub fn owner(&self) -> ModuleId {
        self.owner
    }

    /// Dependency edges in declaration order, duplicates included.
    pub fn dependencies(&self) -> &[ArtifactId] {
        &self.dependencies
    }

    /// Whether this is a library.
    pub fn is_library(&self) -> bool {
        self.kind == ArtifactKind::Library
    }

    pub(crate) fn push_dependency(&mut self, dependency: ArtifactId) {
        self.dependencies.push(dependency);
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
