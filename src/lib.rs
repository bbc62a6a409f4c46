//! Slipway - a package graph and build-order engine for project-file generators.
//!
//! This crate provides the core model a build-description generator needs:
//! modules that declare other modules as dependencies, per-module build
//! artifacts (a main library and a paired test executable), and a resolver
//! that flattens the artifact graph into a deterministic, cycle-free build
//! order the generator can turn into project files.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

pub use crate::core::{
    artifact::{Artifact, ArtifactId, ArtifactKind},
    builder::ModuleBuilder,
    module::{Module, ModuleId},
    registry::{Registry, RegistryError},
};

pub use crate::resolver::{BuildEntry, BuildOrder, ResolveError};
pub use crate::util::InternedString;
