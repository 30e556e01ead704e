//! Implements the fields of the running simulation and the finite volume mesh

mod field;
mod fv_mesh;
mod registry;
mod sample_meshes;
pub use crate::fields::field::*;
pub use crate::fields::fv_mesh::*;
pub use crate::fields::registry::*;
pub use crate::fields::sample_meshes::*;
