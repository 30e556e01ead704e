use super::ThermalCase;
use crate::base::Error;
use std::path::{Path, PathBuf};

/// Holds the time history and mesh of a separate thermal case, loaded on first demand
pub struct SecondaryContext {
    /// Holds the thermal case directory
    dir: PathBuf,

    /// Holds the thermal case (None until first needed)
    case: Option<ThermalCase>,
}

impl SecondaryContext {
    /// Allocates a new (not yet loaded) instance
    pub fn new(dir: &Path) -> Self {
        SecondaryContext {
            dir: dir.to_path_buf(),
            case: None,
        }
    }

    /// Returns the thermal case directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns true if the thermal case has been loaded
    pub fn is_loaded(&self) -> bool {
        self.case.is_some()
    }

    /// Returns the thermal case, loading it on the first call
    pub fn case(&mut self) -> Result<&ThermalCase, Error> {
        let case = match self.case.take() {
            Some(case) => case,
            None => {
                log::info!("reading the thermal case in {:?}", self.dir);
                ThermalCase::open(&self.dir)?
            }
        };
        Ok(self.case.insert(case))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SecondaryContext;
    use crate::base::{Error, DEFAULT_TEST_DIR};
    use crate::fields::{SampleMeshes, ScalarField};
    use crate::thermal::ThermalCaseWriter;
    use std::fs;
    use std::path::Path;

    #[test]
    fn missing_case_fails() {
        let mut context = SecondaryContext::new(Path::new("/tmp/tmsim/__no_thermal_case__"));
        assert!(!context.is_loaded());
        assert!(matches!(context.case().err(), Some(Error::Configuration(..))));
        assert!(!context.is_loaded());
    }

    #[test]
    fn case_is_loaded_once() {
        let dir = Path::new(DEFAULT_TEST_DIR).join("secondary_context_loaded_once");
        fs::remove_dir_all(&dir).unwrap_or(());
        let mesh = SampleMeshes::strip_qua4(2, 2.0);
        let mut writer = ThermalCaseWriter::new(&dir, &mesh).unwrap();
        writer.write_fields(0.0, &[&ScalarField::new("T", 2, 300.0)]).unwrap();

        let mut context = SecondaryContext::new(&dir);
        assert_eq!(context.dir(), dir.as_path());
        assert_eq!(context.case().unwrap().history.times, &[0.0]);
        assert!(context.is_loaded());

        // later records are not seen because the history is cached
        writer.write_fields(1.0, &[&ScalarField::new("T", 2, 310.0)]).unwrap();
        assert_eq!(context.case().unwrap().history.times, &[0.0]);
    }
}
