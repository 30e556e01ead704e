use crate::StrError;
use thiserror::Error;

/// Holds the errors raised while building or evaluating mechanical laws
///
/// All variants are fatal: they indicate a problem with the configuration or with the
/// data supplied by the user, so no automatic recovery is attempted.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing configuration (e.g., bad coefficients or a missing thermal case)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The field is neither available in the registry nor on disk
    #[error("cannot find field '{name}' in the registry or in the thermal case (t = {time:?})")]
    MissingField {
        /// Name of the requested field
        name: String,

        /// Simulation time when the field was requested
        time: f64,
    },

    /// The data of the thermal case cannot be mapped onto the solid mesh
    #[error(
        "cannot map field '{found_field}' onto the solid mesh (expected '{expected_field}' at t = {expected_time:?}, \
         found t = {found_time:?}): {reason}"
    )]
    MeshMismatch {
        /// Name of the requested field
        expected_field: String,

        /// Name of the field found on disk
        found_field: String,

        /// Simulation time when the field was requested
        expected_time: f64,

        /// Recorded time of the snapshot that was read
        found_time: f64,

        /// Description of the mismatch
        reason: String,
    },

    /// Failure raised by a stress-strain model or by the tensor library
    #[error("{0}")]
    Model(StrError),
}

impl From<StrError> for Error {
    fn from(message: StrError) -> Self {
        Error::Model(message)
    }
}

impl Error {
    /// Returns a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Configuration(message.into())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
