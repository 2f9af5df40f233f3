//! Experiment domain module
//!
//! Experiment metadata as consumed by the exclusion engine, and the
//! directory through which it is looked up.

mod directory;
mod entity;
mod validation;

pub use directory::ExperimentDirectory;
pub use entity::{Experiment, ExperimentId, ExperimentState};
pub use validation::{
    validate_application_name, validate_experiment_id, ExperimentValidationError,
};
