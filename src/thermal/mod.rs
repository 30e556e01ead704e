//! Implements the access to thermal cases stored on disk

mod secondary_context;
mod thermal_case;
pub use crate::thermal::secondary_context::*;
pub use crate::thermal::thermal_case::*;
