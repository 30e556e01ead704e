use super::{LinearElastic, ThermoMechanical, VonMises};
use crate::base::{Config, Error, ParamMechanicalLaw, STRAIN_FACE_NAME, STRAIN_NAME};
use crate::fields::{FaceTensorField, FieldRegistry, FvMesh, ScalarField, TensorField};
use russell_tensor::Tensor2;

/// Specifies the essential functions of mechanical laws (stress-strain relations)
///
/// The laws read the fields they need (e.g., strains) from the registry of the
/// running simulation and never modify it.
pub trait MechanicalLaw: Send {
    /// Returns the name (type tag) of the law
    fn name(&self) -> &'static str;

    /// Returns the bulk modulus K
    fn bulk_modulus(&self) -> f64;

    /// Returns the implicit stiffness
    ///
    /// This is the diffusivity for the Laplacian term of the momentum equation.
    fn imp_k(&self, mesh: &FvMesh) -> ScalarField;

    /// Calculates the cell-centered stress
    fn correct_cells(
        &mut self,
        mesh: &FvMesh,
        fields: &dyn FieldRegistry,
        sigma: &mut TensorField,
    ) -> Result<(), Error>;

    /// Calculates the face-centered stress
    fn correct_faces(
        &mut self,
        mesh: &FvMesh,
        fields: &dyn FieldRegistry,
        sigma: &mut FaceTensorField,
    ) -> Result<(), Error>;
}

/// Holds the actual mechanical law implementation
pub struct MechanicalLawModel {
    /// Holds the actual model implementation
    pub actual: Box<dyn MechanicalLaw>,
}

impl MechanicalLawModel {
    /// Allocates a new instance, selecting the law by name
    pub fn new(config: &Config, param: &ParamMechanicalLaw) -> Result<Self, Error> {
        let actual: Box<dyn MechanicalLaw> = match param {
            // Linear elastic model
            ParamMechanicalLaw::LinearElastic { young, poisson } => {
                check_elastic(*young, *poisson)?;
                Box::new(LinearElastic::new(&config.ideal, *young, *poisson))
            }

            // von Mises plasticity model
            ParamMechanicalLaw::VonMises { young, poisson, z0, hh } => {
                check_elastic(*young, *poisson)?;
                if config.ideal.plane_stress {
                    return Err(Error::config("von Mises model does not work in plane-stress"));
                }
                if *z0 <= 0.0 {
                    return Err(Error::config("z0 must be > 0.0"));
                }
                Box::new(VonMises::new(&config.ideal, *young, *poisson, *z0, *hh)?)
            }

            // thermal term added to another law
            ParamMechanicalLaw::ThermoMechanical { .. } => Box::new(ThermoMechanical::new(config, param)?),
        };
        Ok(MechanicalLawModel { actual })
    }
}

/// Checks the elastic constants
fn check_elastic(young: f64, poisson: f64) -> Result<(), Error> {
    if !(young > 0.0) {
        return Err(Error::config("Young's modulus must be > 0.0"));
    }
    if !(poisson > -1.0 && poisson < 0.5) {
        return Err(Error::config("Poisson's coefficient must be in (-1.0, 0.5)"));
    }
    Ok(())
}

/// Returns the cell-centered strains from the registry
pub(crate) fn cell_strains<'a>(fields: &'a dyn FieldRegistry, ncell: usize) -> Result<&'a [Tensor2], Error> {
    let eps = fields.lookup_tensor(STRAIN_NAME).ok_or_else(|| Error::MissingField {
        name: STRAIN_NAME.to_string(),
        time: fields.time(),
    })?;
    if eps.values.len() != ncell {
        return Err(Error::Model("the number of strain values must equal the number of stress values"));
    }
    Ok(&eps.values)
}

/// Returns the face-centered strains from the registry
pub(crate) fn face_strains<'a>(fields: &'a dyn FieldRegistry, nface: usize) -> Result<&'a [Tensor2], Error> {
    let eps = fields.lookup_face_tensor(STRAIN_FACE_NAME).ok_or_else(|| Error::MissingField {
        name: STRAIN_FACE_NAME.to_string(),
        time: fields.time(),
    })?;
    if eps.values.len() != nface {
        return Err(Error::Model("the number of strain values must equal the number of stress values"));
    }
    Ok(&eps.values)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{cell_strains, face_strains, MechanicalLawModel};
    use crate::base::{Config, Error, ParamMechanicalLaw, SampleParams};
    use crate::fields::{FaceTensorField, Registry, TensorField};
    use russell_tensor::Mandel;

    #[test]
    fn allocate_mechanical_law_works() {
        let mut config = Config::new(2);
        let param = SampleParams::param_linear_elastic();
        let model = MechanicalLawModel::new(&config, &param).unwrap();
        assert_eq!(model.actual.name(), "LinearElastic");

        let param = SampleParams::param_von_mises();
        let model = MechanicalLawModel::new(&config, &param).unwrap();
        assert_eq!(model.actual.name(), "VonMises");

        let param = SampleParams::param_thermo_mechanical("thermal");
        let model = MechanicalLawModel::new(&config, &param).unwrap();
        assert_eq!(model.actual.name(), "ThermoMechanical");

        config.set_plane_stress(true).unwrap();
        let param = SampleParams::param_von_mises();
        assert_eq!(
            MechanicalLawModel::new(&config, &param).err().unwrap().to_string(),
            "configuration error: von Mises model does not work in plane-stress"
        );
    }

    #[test]
    fn allocate_mechanical_law_captures_errors() {
        let config = Config::new(3);
        let param = ParamMechanicalLaw::LinearElastic {
            young: 0.0,
            poisson: 0.2,
        };
        assert_eq!(
            MechanicalLawModel::new(&config, &param).err().unwrap().to_string(),
            "configuration error: Young's modulus must be > 0.0"
        );
        let param = ParamMechanicalLaw::LinearElastic {
            young: 1000.0,
            poisson: 0.5,
        };
        assert_eq!(
            MechanicalLawModel::new(&config, &param).err().unwrap().to_string(),
            "configuration error: Poisson's coefficient must be in (-1.0, 0.5)"
        );
        let param = ParamMechanicalLaw::VonMises {
            young: 1000.0,
            poisson: 0.25,
            z0: 0.0,
            hh: 0.0,
        };
        assert_eq!(
            MechanicalLawModel::new(&config, &param).err().unwrap().to_string(),
            "configuration error: z0 must be > 0.0"
        );
    }

    #[test]
    fn strains_lookup_works() {
        let mut fields = Registry::new();
        assert!(matches!(cell_strains(&fields, 2).err(), Some(Error::MissingField { .. })));
        assert!(matches!(face_strains(&fields, 7).err(), Some(Error::MissingField { .. })));
        fields.insert_tensor(TensorField::new("epsilon", Mandel::Symmetric2D, 2));
        fields.insert_face_tensor(FaceTensorField::new("epsilonf", Mandel::Symmetric2D, 7));
        assert_eq!(cell_strains(&fields, 2).unwrap().len(), 2);
        assert_eq!(face_strains(&fields, 7).unwrap().len(), 7);
        assert!(matches!(cell_strains(&fields, 3).err(), Some(Error::Model(..))));
    }
}
