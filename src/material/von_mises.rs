use super::{cell_strains, face_strains, MechanicalLaw};
use crate::base::{Error, Idealization};
use crate::fields::{FaceTensorField, FieldRegistry, FvMesh, ScalarField, TensorField};
use crate::StrError;
use russell_tensor::{t4_ddot_t2_update, LinElasticity, Mandel, Tensor2};

/// Defines √(3/2)
const SQRT_3_BY_2: f64 = 1.2247448713915890491;

/// Returns the identity tensor component in the Mandel basis
#[inline]
fn identity(k: usize) -> f64 {
    if k < 3 {
        1.0
    } else {
        0.0
    }
}

/// Returns the mean stress σm and the von Mises stress σd
fn invariants(sigma: &Tensor2) -> (f64, f64) {
    let vec = sigma.vector();
    let sigma_m = (vec[0] + vec[1] + vec[2]) / 3.0;
    let mut norm_s = 0.0;
    for k in 0..vec.dim() {
        let s = vec[k] - sigma_m * identity(k);
        norm_s += s * s;
    }
    (sigma_m, SQRT_3_BY_2 * f64::sqrt(norm_s))
}

/// Holds the last converged state and the current state at a set of locations (cells or faces)
struct History {
    /// Time index of the current state
    time_index: Option<usize>,

    /// Stress at the end of the previous time step
    stress_old: Vec<Tensor2>,

    /// Strain at the end of the previous time step
    strain_old: Vec<Tensor2>,

    /// Size of the yield surface at the end of the previous time step
    z_old: Vec<f64>,

    /// Current stress
    stress_new: Vec<Tensor2>,

    /// Current strain
    strain_new: Vec<Tensor2>,

    /// Current size of the yield surface
    z_new: Vec<f64>,
}

impl History {
    fn new() -> Self {
        History {
            time_index: None,
            stress_old: Vec::new(),
            strain_old: Vec::new(),
            z_old: Vec::new(),
            stress_new: Vec::new(),
            strain_new: Vec::new(),
            z_new: Vec::new(),
        }
    }

    /// Allocates the states on the first call and commits the current state at a new time step
    fn prepare(&mut self, mandel: Mandel, n: usize, z0: f64, time_index: usize) -> Result<(), StrError> {
        if self.z_old.len() == 0 {
            let zero = Tensor2::new(mandel);
            self.stress_old = vec![zero.clone(); n];
            self.strain_old = vec![zero.clone(); n];
            self.z_old = vec![z0; n];
            self.stress_new = vec![zero.clone(); n];
            self.strain_new = vec![zero; n];
            self.z_new = vec![z0; n];
        } else if self.z_old.len() != n {
            return Err("the number of stress values must not change");
        }
        if let Some(index) = self.time_index {
            if index != time_index {
                self.stress_old.clone_from(&self.stress_new);
                self.strain_old.clone_from(&self.strain_new);
                self.z_old.clone_from(&self.z_new);
            }
        }
        self.time_index = Some(time_index);
        Ok(())
    }
}

/// Implements the von Mises plasticity model with linear isotropic hardening
///
/// The stress is updated from the last converged state using an elastic predictor and a
/// radial return. The converged state is committed when a new time step is detected, thus
/// repeated calls within the same time step give the same results.
///
/// **Note:** This model works in 2D (plane-strain only) or 3D.
pub struct VonMises {
    /// Linear elasticity
    lin_elasticity: LinElasticity,

    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,

    /// Hardening coefficient
    hh: f64,

    /// Initial size of the yield surface
    z0: f64,

    /// States at cells
    cells: History,

    /// States at faces
    faces: History,
}

impl VonMises {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, young: f64, poisson: f64, z0: f64, hh: f64) -> Result<Self, StrError> {
        if ideal.plane_stress {
            return Err("von Mises model does not work in plane-stress");
        }
        let lin_elasticity = LinElasticity::new(young, poisson, ideal.two_dim, false);
        let (kk, gg) = lin_elasticity.get_bulk_shear();
        Ok(VonMises {
            lin_elasticity,
            kk,
            gg,
            hh,
            z0,
            cells: History::new(),
            faces: History::new(),
        })
    }

    /// Updates the stresses at a set of locations
    fn update(
        &self,
        hist: &mut History,
        time_index: usize,
        stresses: &mut [Tensor2],
        strains: &[Tensor2],
    ) -> Result<(), StrError> {
        let dd = self.lin_elasticity.get_modulus();
        let mandel = dd.mandel();
        hist.prepare(mandel, stresses.len(), self.z0, time_index)?;
        let mut delta_epsilon = Tensor2::new(mandel);
        for (i, (sigma, epsilon)) in stresses.iter_mut().zip(strains).enumerate() {
            if sigma.mandel() != mandel || epsilon.mandel() != mandel {
                return Err("the stress and strain tensors must have the same Mandel representation");
            }

            // Δε = ε - ε_old
            let nd = epsilon.vector().dim();
            for k in 0..nd {
                delta_epsilon.vector_mut()[k] = epsilon.vector()[k] - hist.strain_old[i].vector()[k];
            }

            // trial stress: σ ← σ_old + D : Δε
            sigma.clone_from(&hist.stress_old[i]);
            t4_ddot_t2_update(sigma, 1.0, dd, &delta_epsilon, 1.0);

            // elastic update
            let z_old = hist.z_old[i];
            let (sigma_m, sigma_d_trial) = invariants(sigma);
            let f_trial = sigma_d_trial - z_old;
            let mut z_new = z_old;

            // elastoplastic update: σ_new = m s_trial + σm_trial I
            if f_trial > 0.0 {
                let lambda = f_trial / (3.0 * self.gg + self.hh);
                let m = 1.0 - lambda * 3.0 * self.gg / sigma_d_trial;
                let vec = sigma.vector_mut();
                for k in 0..nd {
                    let s_trial = vec[k] - sigma_m * identity(k);
                    vec[k] = m * s_trial + sigma_m * identity(k);
                }
                z_new = z_old + lambda * self.hh;
            }

            // record the current state
            hist.stress_new[i].clone_from(sigma);
            hist.strain_new[i].clone_from(epsilon);
            hist.z_new[i] = z_new;
        }
        Ok(())
    }
}

impl MechanicalLaw for VonMises {
    fn name(&self) -> &'static str {
        "VonMises"
    }

    fn bulk_modulus(&self) -> f64 {
        self.kk
    }

    /// Returns the elastic value K + 4G/3
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
        let mut hist = std::mem::replace(&mut self.cells, History::new());
        let res = self.update(&mut hist, fields.time_index(), &mut sigma.values, epsilon);
        self.cells = hist;
        Ok(res?)
    }

    fn correct_faces(
        &mut self,
        _mesh: &FvMesh,
        fields: &dyn FieldRegistry,
        sigma: &mut FaceTensorField,
    ) -> Result<(), Error> {
        let epsilon = face_strains(fields, sigma.values.len())?;
        let mut hist = std::mem::replace(&mut self.faces, History::new());
        let res = self.update(&mut hist, fields.time_index(), &mut sigma.values, epsilon);
        self.faces = hist;
        Ok(res?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
