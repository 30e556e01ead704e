use super::{MechanicalLaw, MechanicalLawModel};
use crate::base::{Config, DimensionedScalar, Dimensions, Error, Idealization, ParamMechanicalLaw};
use crate::fields::{FaceTensorField, FieldRegistry, FvMesh, ScalarField, SharedScalarField, TensorField};
use crate::thermal::SecondaryContext;
use russell_tensor::Tensor2;
use std::path::Path;

/// Indicates where the temperature of the current time step comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureSource {
    /// Not resolved yet
    Unresolved,

    /// Taken from the registry of the running simulation
    Registry,

    /// Read from the thermal case on disk
    Disk,
}

/// Holds the resolved temperature
enum Resolved {
    Unresolved,

    /// Live handle into the registry (not owned)
    Registry(SharedScalarField),

    /// The owned field in `disk_field`
    Disk,
}

/// Implements a thermo-mechanical law
///
/// The stress is the stress of a (run-time selected) mechanical law plus the thermal
/// volumetric stress:
///
/// ```text
/// σ = σ_mech + 3 K α (T - T₀) I_d
/// ```
///
/// where `K` is the bulk modulus of the mechanical law and `I_d` is a diagonal tensor with
/// unit entries only along the solved directions.
///
/// The temperature is resolved once per time step: first from the registry of the running
/// simulation; otherwise, from a separate thermal case on disk (read via a lazily loaded
/// secondary context and mapped onto the solid mesh).
///
/// **Warning:** two-way coupling is not considered, i.e., no heat is generated by the
/// mechanical work. Moreover, if the mechanical law is non-linear in the volumetric stress,
/// the decoupled thermal term may not make sense; this is not checked.
pub struct ThermoMechanical {
    /// Mechanical law (without the thermal term)
    mech_law: Box<dyn MechanicalLaw>,

    /// Coefficient of linear expansion α
    alpha: f64,

    /// Stress-free reference temperature T₀
    t0: f64,

    /// Name of the temperature field
    field_name: String,

    /// Direction-selection tensor
    solution_d: Tensor2,

    /// Thermal case on disk
    context: SecondaryContext,

    /// Resolved temperature
    resolved: Resolved,

    /// Last temperature read from disk (mapped onto the solid mesh)
    disk_field: Option<ScalarField>,

    /// Indicates that the temperature has been read from disk at least once
    field_was_read_from_disk: bool,

    /// Time index of the last resolution
    time_index: Option<usize>,

    /// Counts the reads from disk
    n_disk_read: usize,
}

impl ThermoMechanical {
    /// Allocates a new instance from parameters
    ///
    /// The mechanical law is allocated by name from `mechanical` and the thermal case
    /// address is resolved against the case root given in `config`.
    pub fn new(config: &Config, param: &ParamMechanicalLaw) -> Result<Self, Error> {
        match param {
            ParamMechanicalLaw::ThermoMechanical {
                mechanical,
                alpha,
                t0,
                temperature_case,
                field_name,
            } => {
                if temperature_case.is_empty() {
                    return Err(Error::config("temperature_case must not be empty"));
                }
                let mech_law = MechanicalLawModel::new(config, mechanical)?.actual;
                ThermoMechanical::from_law(
                    mech_law,
                    &config.ideal,
                    alpha,
                    t0,
                    &config.case_path(temperature_case),
                    field_name,
                )
            }
            _ => Err(Error::config("parameters must be of ThermoMechanical type")),
        }
    }

    /// Allocates a new instance wrapping an existing mechanical law
    ///
    /// # Input
    ///
    /// * `mech_law` -- the mechanical law (owned)
    /// * `ideal` -- the idealization with the solved directions
    /// * `alpha` -- coefficient of linear expansion (1/temperature)
    /// * `t0` -- stress-free reference temperature (temperature)
    /// * `case_dir` -- directory of the thermal case
    /// * `field_name` -- name of the temperature field
    pub fn from_law(
        mech_law: Box<dyn MechanicalLaw>,
        ideal: &Idealization,
        alpha: &DimensionedScalar,
        t0: &DimensionedScalar,
        case_dir: &Path,
        field_name: &str,
    ) -> Result<Self, Error> {
        let alpha = alpha.check("alpha", Dimensions::INV_TEMPERATURE)?;
        let t0 = t0.check("T0", Dimensions::TEMPERATURE)?;
        if alpha < 0.0 {
            return Err(Error::config("alpha must be ≥ 0.0"));
        }
        if t0 < 0.0 {
            return Err(Error::config("T0 must be ≥ 0.0"));
        }
        if case_dir.as_os_str().is_empty() {
            return Err(Error::config("the thermal case directory must not be empty"));
        }
        if field_name.is_empty() {
            return Err(Error::config("the temperature field name must not be empty"));
        }
        Ok(ThermoMechanical {
            mech_law,
            alpha,
            t0,
            field_name: field_name.to_string(),
            solution_d: ideal.solution_d_tensor(),
            context: SecondaryContext::new(case_dir),
            resolved: Resolved::Unresolved,
            disk_field: None,
            field_was_read_from_disk: false,
            time_index: None,
            n_disk_read: 0,
        })
    }

    /// Returns the mechanical law
    pub fn mechanical_law(&self) -> &dyn MechanicalLaw {
        self.mech_law.as_ref()
    }

    /// Returns the coefficient of linear expansion α
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the reference temperature T₀
    pub fn t0(&self) -> f64 {
        self.t0
    }

    /// Returns where the current temperature comes from
    pub fn temperature_source(&self) -> TemperatureSource {
        match self.resolved {
            Resolved::Unresolved => TemperatureSource::Unresolved,
            Resolved::Registry(_) => TemperatureSource::Registry,
            Resolved::Disk => TemperatureSource::Disk,
        }
    }

    /// Returns true if the temperature has been read from disk at least once
    pub fn field_was_read_from_disk(&self) -> bool {
        self.field_was_read_from_disk
    }

    /// Returns true if the thermal case on disk has been loaded
    pub fn secondary_context_loaded(&self) -> bool {
        self.context.is_loaded()
    }

    /// Returns the number of temperature reads from disk
    pub fn disk_read_count(&self) -> usize {
        self.n_disk_read
    }

    /// Resolves the temperature if the time index has changed since the last call
    fn resolve(&mut self, mesh: &FvMesh, fields: &dyn FieldRegistry) -> Result<(), Error> {
        let time_index = fields.time_index();
        if self.time_index == Some(time_index) {
            return Ok(());
        }
        if let Some(shared) = fields.lookup_scalar(&self.field_name) {
            log::debug!("using field '{}' from the registry (step {})", self.field_name, time_index);
            self.resolved = Resolved::Registry(shared);
        } else {
            let time = fields.time();
            let case = self.context.case()?;
            match case.read_scalar(&self.field_name, time)? {
                Some((field, found_time)) => {
                    log::info!(
                        "reading field '{}' from {:?} at t = {:?} (simulation t = {:?})",
                        self.field_name,
                        case.dir(),
                        found_time,
                        time
                    );
                    let mapped = case.map_to(&field, found_time, time, mesh)?;
                    self.disk_field = Some(mapped);
                    self.field_was_read_from_disk = true;
                    self.n_disk_read += 1;
                    self.resolved = Resolved::Disk;
                }
                None => {
                    if !self.field_was_read_from_disk || self.disk_field.is_none() {
                        return Err(Error::MissingField {
                            name: self.field_name.clone(),
                            time,
                        });
                    }
                    log::warn!(
                        "cannot find field '{}' at t = {:?}; reusing the field previously read from disk",
                        self.field_name,
                        time
                    );
                    self.resolved = Resolved::Disk;
                }
            }
        }
        self.time_index = Some(time_index);
        Ok(())
    }

    /// Calls a function with the resolved temperature values (ncell)
    fn with_temperature<F>(&self, ncell: usize, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&[f64]) -> Result<(), Error>,
    {
        let check = |values: &[f64]| {
            if values.len() != ncell {
                return Err(Error::Model("the number of temperature values must equal the number of cells"));
            }
            Ok(())
        };
        match &self.resolved {
            Resolved::Registry(shared) => {
                let field = shared
                    .read()
                    .map_err(|_| Error::Model("cannot access the temperature field"))?;
                check(&field.values)?;
                f(&field.values)
            }
            Resolved::Disk => match &self.disk_field {
                Some(field) => {
                    check(&field.values)?;
                    f(&field.values)
                }
                None => Err(Error::Model("the temperature has not been read from disk")),
            },
            Resolved::Unresolved => Err(Error::Model("the temperature has not been resolved")),
        }
    }
}

/// Adds the thermal stress to a list of stresses
fn add_thermal_stress(
    stresses: &mut [Tensor2],
    temperature: &[f64],
    three_kk_alpha: f64,
    t0: f64,
    solution_d: &Tensor2,
) -> Result<(), Error> {
    if stresses.len() != temperature.len() {
        return Err(Error::Model("the number of temperature values must equal the number of stress values"));
    }
    let mask = solution_d.vector();
    for (sigma, tt) in stresses.iter_mut().zip(temperature) {
        if sigma.mandel() != solution_d.mandel() {
            return Err(Error::Model("the stress tensor must have the Mandel representation of the idealization"));
        }
        let magnitude = three_kk_alpha * (tt - t0);
        let vec = sigma.vector_mut();
        for k in 0..mask.dim() {
            vec[k] += magnitude * mask[k];
        }
    }
    Ok(())
}

impl MechanicalLaw for ThermoMechanical {
    fn name(&self) -> &'static str {
        "ThermoMechanical"
    }

    fn bulk_modulus(&self) -> f64 {
        self.mech_law.bulk_modulus()
    }

    /// Returns the implicit stiffness of the mechanical law (the thermal term is explicit)
    fn imp_k(&self, mesh: &FvMesh) -> ScalarField {
        self.mech_law.imp_k(mesh)
    }

    fn correct_cells(
        &mut self,
        mesh: &FvMesh,
        fields: &dyn FieldRegistry,
        sigma: &mut TensorField,
    ) -> Result<(), Error> {
        self.resolve(mesh, fields)?;
        self.mech_law.correct_cells(mesh, fields, sigma)?;
        let three_kk_alpha = 3.0 * self.mech_law.bulk_modulus() * self.alpha;
        self.with_temperature(mesh.ncell(), |temperature| {
            add_thermal_stress(&mut sigma.values, temperature, three_kk_alpha, self.t0, &self.solution_d)
        })
    }

    fn correct_faces(
        &mut self,
        mesh: &FvMesh,
        fields: &dyn FieldRegistry,
        sigma: &mut FaceTensorField,
    ) -> Result<(), Error> {
        self.resolve(mesh, fields)?;
        self.mech_law.correct_faces(mesh, fields, sigma)?;
        let three_kk_alpha = 3.0 * self.mech_law.bulk_modulus() * self.alpha;
        self.with_temperature(mesh.ncell(), |temperature| {
            let temperature_f = mesh.interpolate(temperature)?;
            add_thermal_stress(&mut sigma.values, &temperature_f, three_kk_alpha, self.t0, &self.solution_d)
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
