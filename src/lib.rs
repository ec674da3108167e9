//! # lsystem-tree
//!
//! Procedurally generates 3D tree skeletons from an L-System grammar: a
//! symbolic string is expanded by production rules, interpreted as
//! turtle-graphics drawing commands into a 3D point trail, and finally
//! derived into cylindrical branch transforms.
//!
//! The crate is engine-agnostic. It hands [`BranchDescriptor`]s to any
//! scene graph behind the [`RenderBackend`] trait, so the same generator
//! drives game engines, offline mesh builders, or test doubles.

pub mod branch;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod tree;
pub mod turtle;

pub use branch::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use tree::*;
pub use turtle::*;
