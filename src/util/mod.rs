//! Shared utilities.

pub mod diagnostic;
pub mod interning;

pub use interning::InternedString;
