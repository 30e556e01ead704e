use super::{DimensionedScalar, Dimensions, ParamMechanicalLaw, DEFAULT_TEMPERATURE_NAME};

/// Holds samples of material parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns sample parameters for a linear elastic law
    pub fn param_linear_elastic() -> ParamMechanicalLaw {
        ParamMechanicalLaw::LinearElastic {
            young: 10_000.0, // kPa
            poisson: 0.2,    // [-]
        }
    }

    /// Returns sample parameters for the von Mises plasticity law
    pub fn param_von_mises() -> ParamMechanicalLaw {
        ParamMechanicalLaw::VonMises {
            young: 10_000.0, // kPa
            poisson: 0.2,    // [-]
            z0: 9.0,         // kPa
            hh: 800.0,       // kPa
        }
    }

    /// Returns sample parameters for a thermo-mechanical law wrapping a linear elastic law
    ///
    /// α = 1e-5 1/K and T₀ = 300 K
    pub fn param_thermo_mechanical(temperature_case: &str) -> ParamMechanicalLaw {
        ParamMechanicalLaw::ThermoMechanical {
            mechanical: Box::new(SampleParams::param_linear_elastic()),
            alpha: DimensionedScalar::new(1e-5, Dimensions::INV_TEMPERATURE),
            t0: DimensionedScalar::new(300.0, Dimensions::TEMPERATURE),
            temperature_case: temperature_case.to_string(),
            field_name: DEFAULT_TEMPERATURE_NAME.to_string(),
        }
    }
}
