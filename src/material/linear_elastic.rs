use super::{cell_strains, face_strains, MechanicalLaw};
use crate::base::{Error, Idealization};
use crate::fields::{FaceTensorField, FieldRegistry, FvMesh, ScalarField, TensorField};
use crate::StrError;
use russell_tensor::{t4_ddot_t2_update, LinElasticity, Tensor2};

/// Implements a linear elastic model
pub struct LinearElastic {
    /// Linear elasticity
    model: LinElasticity,

    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,
}

impl LinearElastic {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, young: f64, poisson: f64) -> Self {
        let model = LinElasticity::new(young, poisson, ideal.two_dim, ideal.plane_stress);
        let (kk, gg) = model.get_bulk_shear();
        LinearElastic { model, kk, gg }
    }

    /// Calculates σ = D : ε for a list of strains
    fn calc_stresses(&self, stresses: &mut [Tensor2], strains: &[Tensor2]) -> Result<(), StrError> {
        let dd = self.model.get_modulus();
        for (sigma, epsilon) in stresses.iter_mut().zip(strains) {
            if sigma.mandel() != epsilon.mandel() || sigma.mandel() != dd.mandel() {
                return Err("the stress and strain tensors must have the same Mandel representation");
            }
            t4_ddot_t2_update(sigma, 1.0, dd, epsilon, 0.0); // σ = D : ε
        }
        Ok(())
    }
}

impl MechanicalLaw for LinearElastic {
    fn name(&self) -> &'static str {
        "LinearElastic"
    }

    fn bulk_modulus(&self) -> f64 {
        self.kk
    }

    /// Returns K + 4G/3 (i.e., 2μ + λ)
    fn imp_k(&self, mesh: &FvMesh) -> ScalarField {
        ScalarField::new("impK", mesh.ncell(), self.kk + 4.0 * self.gg / 3.0)
    }

    fn correct_cells(
        &mut self,
        _mesh: &FvMesh,
        fields: &dyn FieldRegistry,
        sigma: &mut TensorField,
    ) -> Result<(), Error> {
        let epsilon = cell_strains(fields, sigma.values.len())?;
        self.calc_stresses(&mut sigma.values, epsilon)?;
        Ok(())
    }

    fn correct_faces(
        &mut self,
        _mesh: &FvMesh,
        fields: &dyn FieldRegistry,
        sigma: &mut FaceTensorField,
    ) -> Result<(), Error> {
        let epsilon = face_strains(fields, sigma.values.len())?;
        self.calc_stresses(&mut sigma.values, epsilon)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
