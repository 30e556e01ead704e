//! Implements the mechanical laws (stress-strain relations)

mod linear_elastic;
mod mechanical_law;
#[cfg(test)]
pub(crate) mod testing;
mod thermo_mechanical;
mod von_mises;
pub use crate::material::linear_elastic::*;
pub use crate::material::mechanical_law::*;
pub use crate::material::thermo_mechanical::*;
pub use crate::material::von_mises::*;
