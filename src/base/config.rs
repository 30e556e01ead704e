use super::{Error, Idealization, ParamMechanicalLaw};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Holds configuration data for the mechanical laws
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Holds the geometry idealization and the solved directions
    pub ideal: Idealization,

    /// Holds the root directory of the running case
    ///
    /// The relative address of the thermal case is resolved against this directory.
    pub case_root: String,

    /// Holds the parameters of the mechanical law
    pub law: Option<ParamMechanicalLaw>,
}

impl Config {
    /// Allocates a new instance
    pub fn new(ndim: usize) -> Self {
        Config {
            ideal: Idealization::new(ndim),
            case_root: ".".to_string(),
            law: None,
        }
    }

    /// Reads a JSON file containing the configuration
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, Error>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| Error::config(format!("cannot open {:?}", path)))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .map_err(|e| Error::config(format!("cannot parse {:?}: {}", path, e)))?;
        if config.ideal.two_dim && config.ideal.solution_d[2] {
            return Err(Error::config("the z direction cannot be solved in 2D"));
        }
        Ok(config)
    }

    /// Sets the root directory of the running case
    pub fn set_case_root(&mut self, dir: &str) -> Result<&mut Self, StrError> {
        if dir.is_empty() {
            return Err("case root must not be empty");
        }
        self.case_root = dir.to_string();
        Ok(self)
    }

    /// Sets a 2D plane-stress problem, otherwise plane-strain in 2D
    pub fn set_plane_stress(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        if flag && !self.ideal.two_dim {
            return Err("plane-stress requires a 2D idealization");
        }
        self.ideal.plane_stress = flag;
        Ok(self)
    }

    /// Sets the directions along which the equations are solved
    pub fn set_solution_d(&mut self, x: bool, y: bool, z: bool) -> Result<&mut Self, StrError> {
        if z && self.ideal.two_dim {
            return Err("the z direction cannot be solved in 2D");
        }
        self.ideal.solution_d = [x, y, z];
        Ok(self)
    }

    /// Sets the parameters of the mechanical law
    pub fn set_law(&mut self, param: ParamMechanicalLaw) -> Result<&mut Self, StrError> {
        self.law = Some(param);
        Ok(self)
    }

    /// Returns the full path of a directory given relative to the case root
    pub fn case_path(&self, relative: &str) -> PathBuf {
        Path::new(&self.case_root).join(relative)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n")?;
        write!(f, "==================\n")?;
        write!(f, "two_dim = {:?}\n", self.ideal.two_dim)?;
        write!(f, "plane_stress = {:?}\n", self.ideal.plane_stress)?;
        write!(f, "solution_d = {:?}\n", self.ideal.solution_d)?;
        write!(f, "case_root = {:?}\n", self.case_root)?;

        write!(f, "\nMechanical law\n")?;
        write!(f, "==============\n")?;
        match &self.law {
            Some(p) => write!(f, "{} → {:?}\n", p.name(), p)?,
            None => write!(f, "None\n")?,
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::base::{ParamMechanicalLaw, DEFAULT_TEST_DIR};
    use crate::StrError;
    use std::fs;
    use std::path::Path;

    #[test]
    fn new_works() -> Result<(), StrError> {
        let mut config = Config::new(2);
        config
            .set_case_root("/tmp/solid")?
            .set_plane_stress(true)?
            .set_solution_d(true, false, false)?
            .set_law(ParamMechanicalLaw::LinearElastic {
                young: 10_000.0, // kPa
                poisson: 0.2,    // [-]
            })?;
        assert_eq!(
            format!("{}", config),
            "Configuration data\n\
             ==================\n\
             two_dim = true\n\
             plane_stress = true\n\
             solution_d = [true, false, false]\n\
             case_root = \"/tmp/solid\"\n\
             \n\
             Mechanical law\n\
             ==============\n\
             LinearElastic → LinearElastic { young: 10000.0, poisson: 0.2 }\n"
        );
        assert_eq!(config.case_path("../thermal"), Path::new("/tmp/solid/../thermal"));
        Ok(())
    }

    #[test]
    fn catch_some_errors() -> Result<(), StrError> {
        let mut config = Config::new(3);
        assert_eq!(config.set_case_root("").err(), Some("case root must not be empty"));
        assert_eq!(
            config.set_plane_stress(true).err(),
            Some("plane-stress requires a 2D idealization")
        );
        let mut config = Config::new(2);
        assert_eq!(
            config.set_solution_d(true, true, true).err(),
            Some("the z direction cannot be solved in 2D")
        );
        Ok(())
    }

    #[test]
    fn read_json_works() {
        let path = format!("{}/config_read_json_works.json", DEFAULT_TEST_DIR);
        fs::create_dir_all(DEFAULT_TEST_DIR).unwrap();
        let json = r#"{
            "ideal": { "two_dim": false, "plane_stress": false, "solution_d": [true, true, true] },
            "case_root": "/tmp/solid",
            "law": { "type": "LinearElastic", "young": 1000.0, "poisson": 0.25 }
        }"#;
        fs::write(&path, json).unwrap();
        let config = Config::read_json(&path).unwrap();
        assert_eq!(config.case_root, "/tmp/solid");
        assert_eq!(config.law.unwrap().name(), "LinearElastic");

        let err = Config::read_json("/tmp/tmsim/__not_found__.json").err().unwrap();
        assert_eq!(
            err.to_string(),
            "configuration error: cannot open \"/tmp/tmsim/__not_found__.json\""
        );
    }
}
