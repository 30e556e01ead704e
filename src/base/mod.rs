//! Implements the base structures: configuration, parameters, and errors

mod config;
mod constants;
mod dimensioned;
mod error;
mod idealization;
mod parameters;
mod sample_params;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::dimensioned::*;
pub use crate::base::error::*;
pub use crate::base::idealization::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_params::*;
