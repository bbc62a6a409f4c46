//! Build-order resolution.
//!
//! The resolver walks artifact dependency edges depth-first and emits a
//! post-order sequence: every artifact appears after all of its
//! dependencies, which is exactly the link-order contract a project-file
//! emitter relies on. Resolution is pure - it reads the registry and never
//! mutates it - and deterministic: ties between independent artifacts
//! follow first-registration order.

pub mod errors;
pub mod plan;
pub mod resolve;

pub use errors::ResolveError;
pub use plan::{BuildEntry, BuildOrder};
pub use resolve::{module_order, resolve};
