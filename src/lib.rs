//! Thermo-mechanical laws for finite volume solid mechanics
//!
//! The [material::ThermoMechanical] law adds a thermal volumetric stress to the stress of
//! any other [material::MechanicalLaw]. The temperature is taken from the registry of the
//! running simulation or, if not available there, from a separate thermal case on disk.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod fields;
pub mod material;
pub mod thermal;
