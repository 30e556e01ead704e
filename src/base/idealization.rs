use russell_tensor::{Mandel, Tensor2};
use serde::{Deserialize, Serialize};

/// Defines the geometry idealization (plane-strain, plane-stress, or 3D) and the solved directions
///
/// # Default values
///
/// * In 2D, the default choice is **plane-strain**
/// * In 2D, only the x and y directions are solved; in 3D, all directions are solved
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Idealization {
    /// Indicates 2D instead of 3D
    pub two_dim: bool,

    /// Indicates a plane-stress idealization in 2D
    pub plane_stress: bool,

    /// Indicates whether the equations are solved along x, y, and z
    pub solution_d: [bool; 3],
}

impl Idealization {
    /// Allocates a new instance
    ///
    /// # Default values
    ///
    /// * `2D`: plane-strain, solving along x and y
    /// * `3D`: no idealization, solving along x, y, and z
    pub fn new(ndim: usize) -> Self {
        Idealization {
            two_dim: ndim == 2,
            plane_stress: false,
            solution_d: [true, true, ndim == 3],
        }
    }

    /// Returns the symmetric Mandel representation associated with the idealization
    ///
    /// # Results
    ///
    /// * `2D`: [Mandel::Symmetric2D]
    /// * `3D`: [Mandel::Symmetric]
    pub fn mandel(&self) -> Mandel {
        if self.two_dim {
            Mandel::Symmetric2D
        } else {
            Mandel::Symmetric
        }
    }

    /// Returns the direction-selection tensor
    ///
    /// This is an "identity" tensor whose diagonal entries are 1 only where the equations
    /// are solved, and 0 otherwise. All off-diagonal entries are zero.
    pub fn solution_d_tensor(&self) -> Tensor2 {
        let mut tensor = Tensor2::new(self.mandel());
        let vec = tensor.vector_mut();
        for i in 0..3 {
            vec[i] = if self.solution_d[i] { 1.0 } else { 0.0 };
        }
        tensor
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
