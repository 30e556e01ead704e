use russell_tensor::{Mandel, Tensor2};
use serde::{Deserialize, Serialize};

/// Holds a cell-centered scalar field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    /// Holds the name of the field
    pub name: String,

    /// Holds the values (ncell)
    pub values: Vec<f64>,
}

/// Holds a cell-centered symmetric tensor field
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TensorField {
    /// Holds the name of the field
    pub name: String,

    /// Holds the values (ncell)
    pub values: Vec<Tensor2>,
}

/// Holds a face-centered symmetric tensor field
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaceTensorField {
    /// Holds the name of the field
    pub name: String,

    /// Holds the values (nface)
    pub values: Vec<Tensor2>,
}

impl ScalarField {
    /// Allocates a new instance with a uniform value
    pub fn new(name: &str, ncell: usize, value: f64) -> Self {
        ScalarField {
            name: name.to_string(),
            values: vec![value; ncell],
        }
    }

    /// Allocates a new instance from values
    pub fn from(name: &str, values: &[f64]) -> Self {
        ScalarField {
            name: name.to_string(),
            values: values.to_vec(),
        }
    }
}

impl TensorField {
    /// Allocates a new instance with zero tensors
    pub fn new(name: &str, mandel: Mandel, ncell: usize) -> Self {
        TensorField {
            name: name.to_string(),
            values: vec![Tensor2::new(mandel); ncell],
        }
    }
}

impl FaceTensorField {
    /// Allocates a new instance with zero tensors
    pub fn new(name: &str, mandel: Mandel, nface: usize) -> Self {
        FaceTensorField {
            name: name.to_string(),
            values: vec![Tensor2::new(mandel); nface],
        }
    }
}

/// Sets all tensors of a list to the same value
pub fn set_uniform(values: &mut [Tensor2], tensor: &Tensor2) {
    for t in values.iter_mut() {
        t.clone_from(tensor);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
