use super::MechanicalLaw;
use crate::base::Error;
use crate::fields::{FaceTensorField, FieldRegistry, FvMesh, Registry, ScalarField, SharedScalarField, TensorField};
use russell_tensor::Tensor2;
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Implements a mechanical law returning a fixed stress, regardless of the strains
pub(crate) struct FixedStressLaw {
    /// Bulk modulus
    pub kk: f64,

    /// Stress assigned to all cells and faces
    pub stress: Tensor2,

    /// Counts the number of calls to correct (cells and faces); shared with the caller
    pub n_correct: Arc<AtomicUsize>,
}

impl FixedStressLaw {
    pub fn new(kk: f64, stress: Tensor2) -> Self {
        FixedStressLaw {
            kk,
            stress,
            n_correct: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MechanicalLaw for FixedStressLaw {
    fn name(&self) -> &'static str {
        "FixedStress"
    }

    fn bulk_modulus(&self) -> f64 {
        self.kk
    }

    fn imp_k(&self, mesh: &FvMesh) -> ScalarField {
        ScalarField::new("impK", mesh.ncell(), 2.0 * self.kk)
    }

    fn correct_cells(&mut self, _: &FvMesh, _: &dyn FieldRegistry, sigma: &mut TensorField) -> Result<(), Error> {
        self.n_correct.fetch_add(1, Ordering::SeqCst);
        crate::fields::set_uniform(&mut sigma.values, &self.stress);
        Ok(())
    }

    fn correct_faces(&mut self, _: &FvMesh, _: &dyn FieldRegistry, sigma: &mut FaceTensorField) -> Result<(), Error> {
        self.n_correct.fetch_add(1, Ordering::SeqCst);
        crate::fields::set_uniform(&mut sigma.values, &self.stress);
        Ok(())
    }
}

/// Wraps a registry and counts the scalar lookups
pub(crate) struct CountingRegistry {
    pub registry: Registry,
    pub n_lookup_scalar: Cell<usize>,
}

impl CountingRegistry {
    pub fn new() -> Self {
        CountingRegistry {
            registry: Registry::new(),
            n_lookup_scalar: Cell::new(0),
        }
    }
}

impl FieldRegistry for CountingRegistry {
    fn time(&self) -> f64 {
        self.registry.time()
    }

    fn time_index(&self) -> usize {
        self.registry.time_index()
    }

    fn lookup_scalar(&self, name: &str) -> Option<SharedScalarField> {
        self.n_lookup_scalar.set(self.n_lookup_scalar.get() + 1);
        self.registry.lookup_scalar(name)
    }

    fn lookup_tensor(&self, name: &str) -> Option<&TensorField> {
        self.registry.lookup_tensor(name)
    }

    fn lookup_face_tensor(&self, name: &str) -> Option<&FaceTensorField> {
        self.registry.lookup_face_tensor(name)
    }
}
