use super::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds the exponents of the SI base units
///
/// The order is: mass, length, time, temperature, moles, current, luminous intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions(pub [i32; 7]);

impl Dimensions {
    /// Temperature, e.g., K
    pub const TEMPERATURE: Dimensions = Dimensions([0, 0, 0, 1, 0, 0, 0]);

    /// Inverse of temperature, e.g., 1/K
    pub const INV_TEMPERATURE: Dimensions = Dimensions([0, 0, 0, -1, 0, 0, 0]);
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.0;
        write!(f, "[{} {} {} {} {} {} {}]", d[0], d[1], d[2], d[3], d[4], d[5], d[6])
    }
}

/// Holds a scalar value with physical dimensions
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionedScalar {
    /// Holds the value
    pub value: f64,

    /// Holds the dimensions
    pub dimensions: Dimensions,
}

impl DimensionedScalar {
    /// Allocates a new instance
    pub fn new(value: f64, dimensions: Dimensions) -> Self {
        DimensionedScalar { value, dimensions }
    }

    /// Returns the value after checking the dimensions and finiteness
    ///
    /// # Input
    ///
    /// * `name` -- name of the quantity (used in the error message)
    /// * `expected` -- the required dimensions
    pub fn check(&self, name: &str, expected: Dimensions) -> Result<f64, Error> {
        if self.dimensions != expected {
            return Err(Error::config(format!(
                "dimensions of {} are {} but {} are required",
                name, self.dimensions, expected
            )));
        }
        if !self.value.is_finite() {
            return Err(Error::config(format!("{} must be finite", name)));
        }
        Ok(self.value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
