use super::{DimensionedScalar, DEFAULT_TEMPERATURE_NAME};
use serde::{Deserialize, Serialize};

/// Holds parameters for mechanical laws (stress-strain relations)
///
/// The `type` tag selects the law at runtime, e.g.:
///
/// ```text
/// { "type": "LinearElastic", "young": 10000.0, "poisson": 0.2 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParamMechanicalLaw {
    /// Linear elastic model
    LinearElastic {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },

    /// von Mises plasticity model
    VonMises {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,

        /// Initial size of the yield surface
        ///
        /// This value corresponds to the von Mises stress:
        ///
        /// ```text
        /// f = σd - z
        /// ```
        z0: f64,

        /// Hardening coefficient
        hh: f64,
    },

    /// Thermal volumetric stress added to the stress of another (run-time selected) law
    ///
    /// **Warning:** if the mechanical law is a non-linear function of the volumetric
    /// stress (e.g., plasticity depending on the mean stress), this decoupled approach
    /// may not make sense. Checking this is up to the user.
    ThermoMechanical {
        /// Mechanical law giving the stress without the thermal term
        mechanical: Box<ParamMechanicalLaw>,

        /// Coefficient of linear expansion α (1/temperature)
        alpha: DimensionedScalar,

        /// Stress-free reference temperature T₀
        t0: DimensionedScalar,

        /// Address of the thermal case, relative to the case root
        ///
        /// The temperature is read from this case if it is not available in the registry.
        temperature_case: String,

        /// Name of the temperature field
        #[serde(default = "default_temperature_name")]
        field_name: String,
    },
}

fn default_temperature_name() -> String {
    DEFAULT_TEMPERATURE_NAME.to_string()
}

impl ParamMechanicalLaw {
    /// Returns the name (type tag) of the law
    pub fn name(&self) -> &'static str {
        match self {
            ParamMechanicalLaw::LinearElastic { .. } => "LinearElastic",
            ParamMechanicalLaw::VonMises { .. } => "VonMises",
            ParamMechanicalLaw::ThermoMechanical { .. } => "ThermoMechanical",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ParamMechanicalLaw;
    use crate::base::{DimensionedScalar, Dimensions};

    #[test]
    fn deserialize_by_name_works() {
        let json = r#"{
            "type": "ThermoMechanical",
            "mechanical": { "type": "LinearElastic", "young": 10000.0, "poisson": 0.2 },
            "alpha": { "value": 1e-5, "dimensions": [0, 0, 0, -1, 0, 0, 0] },
            "t0": { "value": 300.0, "dimensions": [0, 0, 0, 1, 0, 0, 0] },
            "temperature_case": "../thermal"
        }"#;
        let param: ParamMechanicalLaw = serde_json::from_str(json).unwrap();
        assert_eq!(param.name(), "ThermoMechanical");
        assert_eq!(
            param,
            ParamMechanicalLaw::ThermoMechanical {
                mechanical: Box::new(ParamMechanicalLaw::LinearElastic {
                    young: 10000.0,
                    poisson: 0.2
                }),
                alpha: DimensionedScalar::new(1e-5, Dimensions::INV_TEMPERATURE),
                t0: DimensionedScalar::new(300.0, Dimensions::TEMPERATURE),
                temperature_case: "../thermal".to_string(),
                field_name: "T".to_string(),
            }
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        let json = r#"{ "type": "CamClay", "mm": 1.0 }"#;
        let res: Result<ParamMechanicalLaw, _> = serde_json::from_str(json);
        assert!(res.is_err());
    }

    #[test]
    fn name_works() {
        let p = ParamMechanicalLaw::VonMises {
            young: 1.0,
            poisson: 0.25,
            z0: 9.0,
            hh: 0.0,
        };
        assert_eq!(p.name(), "VonMises");
    }
}
