//! Core data structures.
//!
//! The foundational types for describing a build to a project-file
//! generator:
//! - Module descriptors and their identifiers
//! - Artifacts (libraries and executables) and their dependency edges
//! - The registry that owns everything for one generation run
//! - The builder that wires a module's library and test executable

pub mod artifact;
pub mod builder;
pub mod module;
pub mod registry;

pub use artifact::{Artifact, ArtifactId, ArtifactKind};
pub use builder::ModuleBuilder;
pub use module::{Module, ModuleId};
pub use registry::{Registry, RegistryError};
