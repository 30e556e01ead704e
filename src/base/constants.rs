/// Defines the default name of the temperature field
pub const DEFAULT_TEMPERATURE_NAME: &str = "T";

/// Defines the name of the cell-centered (total) strain field read by the stress-strain models
pub const STRAIN_NAME: &str = "epsilon";

/// Defines the name of the face-centered (total) strain field read by the stress-strain models
pub const STRAIN_FACE_NAME: &str = "epsilonf";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/tmsim/test";
