use super::{FaceTensorField, ScalarField, TensorField};
use crate::StrError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Defines a scalar field shared between the registry and its users
///
/// Holding a clone of this handle gives access to the live values stored in the registry.
pub type SharedScalarField = Arc<RwLock<ScalarField>>;

/// Specifies the read-only access to the fields of the running simulation
pub trait FieldRegistry {
    /// Returns the current simulation time
    fn time(&self) -> f64;

    /// Returns the index of the current time step
    ///
    /// This index only changes when the time-stepping driver advances to a new step,
    /// not during the (non-linear) iterations of the same step.
    fn time_index(&self) -> usize;

    /// Looks up a cell-centered scalar field by name
    fn lookup_scalar(&self, name: &str) -> Option<SharedScalarField>;

    /// Looks up a cell-centered tensor field by name
    fn lookup_tensor(&self, name: &str) -> Option<&TensorField>;

    /// Looks up a face-centered tensor field by name
    fn lookup_face_tensor(&self, name: &str) -> Option<&FaceTensorField>;
}

/// Holds the named fields of the running simulation
pub struct Registry {
    time: f64,
    time_index: usize,
    scalars: HashMap<String, SharedScalarField>,
    tensors: HashMap<String, TensorField>,
    face_tensors: HashMap<String, FaceTensorField>,
}

impl Registry {
    /// Allocates a new instance at t = 0 and time index = 0
    pub fn new() -> Self {
        Registry {
            time: 0.0,
            time_index: 0,
            scalars: HashMap::new(),
            tensors: HashMap::new(),
            face_tensors: HashMap::new(),
        }
    }

    /// Sets the time and time index
    pub fn set_time(&mut self, time: f64, time_index: usize) -> Result<&mut Self, StrError> {
        if time_index < self.time_index {
            return Err("the time index must not decrease");
        }
        if time < self.time {
            return Err("the time must not decrease");
        }
        self.time = time;
        self.time_index = time_index;
        Ok(self)
    }

    /// Advances to the next time step
    pub fn advance(&mut self, delta_time: f64) -> Result<&mut Self, StrError> {
        if delta_time <= 0.0 {
            return Err("the time increment must be > 0.0");
        }
        self.time += delta_time;
        self.time_index += 1;
        Ok(self)
    }

    /// Inserts (or replaces) a scalar field and returns the shared handle
    pub fn insert_scalar(&mut self, field: ScalarField) -> SharedScalarField {
        let name = field.name.clone();
        let shared = Arc::new(RwLock::new(field));
        self.scalars.insert(name, shared.clone());
        shared
    }

    /// Inserts (or replaces) a cell-centered tensor field
    pub fn insert_tensor(&mut self, field: TensorField) -> &mut Self {
        self.tensors.insert(field.name.clone(), field);
        self
    }

    /// Inserts (or replaces) a face-centered tensor field
    pub fn insert_face_tensor(&mut self, field: FaceTensorField) -> &mut Self {
        self.face_tensors.insert(field.name.clone(), field);
        self
    }

    /// Returns mutable access to a cell-centered tensor field
    pub fn tensor_mut(&mut self, name: &str) -> Option<&mut TensorField> {
        self.tensors.get_mut(name)
    }

    /// Returns mutable access to a face-centered tensor field
    pub fn face_tensor_mut(&mut self, name: &str) -> Option<&mut FaceTensorField> {
        self.face_tensors.get_mut(name)
    }

    /// Removes a scalar field
    pub fn remove_scalar(&mut self, name: &str) -> Option<SharedScalarField> {
        self.scalars.remove(name)
    }
}

impl FieldRegistry for Registry {
    fn time(&self) -> f64 {
        self.time
    }

    fn time_index(&self) -> usize {
        self.time_index
    }

    fn lookup_scalar(&self, name: &str) -> Option<SharedScalarField> {
        self.scalars.get(name).cloned()
    }

    fn lookup_tensor(&self, name: &str) -> Option<&TensorField> {
        self.tensors.get(name)
    }

    fn lookup_face_tensor(&self, name: &str) -> Option<&FaceTensorField> {
        self.face_tensors.get(name)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{FieldRegistry, Registry};
    use crate::fields::{ScalarField, TensorField};
    use russell_tensor::Mandel;

    #[test]
    fn time_works() {
        let mut reg = Registry::new();
        assert_eq!(reg.time(), 0.0);
        assert_eq!(reg.time_index(), 0);
        reg.set_time(1.0, 2).unwrap();
        assert_eq!(reg.set_time(2.0, 1).err(), Some("the time index must not decrease"));
        assert_eq!(reg.set_time(0.5, 3).err(), Some("the time must not decrease"));
        assert_eq!(reg.advance(0.0).err(), Some("the time increment must be > 0.0"));
        reg.advance(0.5).unwrap();
        assert_eq!(reg.time(), 1.5);
        assert_eq!(reg.time_index(), 3);
    }

    #[test]
    fn lookup_works() {
        let mut reg = Registry::new();
        assert!(reg.lookup_scalar("T").is_none());
        let handle = reg.insert_scalar(ScalarField::new("T", 2, 300.0));
        let found = reg.lookup_scalar("T").unwrap();
        assert_eq!(found.read().unwrap().values, &[300.0, 300.0]);

        // the handle reflects the live values
        handle.write().unwrap().values[1] = 310.0;
        assert_eq!(found.read().unwrap().values, &[300.0, 310.0]);

        reg.insert_tensor(TensorField::new("epsilon", Mandel::Symmetric2D, 2));
        assert_eq!(reg.lookup_tensor("epsilon").unwrap().values.len(), 2);
        reg.tensor_mut("epsilon").unwrap().values[0].sym_set(0, 0, 1e-3);
        assert_eq!(reg.lookup_tensor("epsilon").unwrap().values[0].get(0, 0), 1e-3);
        assert!(reg.lookup_face_tensor("epsilonf").is_none());

        assert!(reg.remove_scalar("T").is_some());
        assert!(reg.lookup_scalar("T").is_none());
    }
}
