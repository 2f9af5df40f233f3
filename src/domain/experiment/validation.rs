//! Experiment validation utilities

use thiserror::Error;

/// Maximum length for experiment IDs
pub const MAX_EXPERIMENT_ID_LENGTH: usize = 64;

/// Maximum length for application names
pub const MAX_APPLICATION_NAME_LENGTH: usize = 64;

/// Validation errors for experiment metadata
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExperimentValidationError {
    #[error("Experiment ID cannot be empty")]
    EmptyId,

    #[error("Experiment ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("Experiment ID contains invalid character: '{0}'")]
    InvalidIdCharacter(char),

    #[error("Application name cannot be empty")]
    EmptyApplicationName,

    #[error("Application name exceeds maximum length of {0} characters")]
    ApplicationNameTooLong(usize),

    #[error("Invalid experiment state transition from {0} to {1}")]
    InvalidStateTransition(String, String),
}

/// Validate an experiment ID
///
/// IDs are opaque to the engine; only ASCII letters, digits, `-` and `_`
/// are accepted so they stay safe to embed in storage keys.
pub fn validate_experiment_id(id: &str) -> Result<(), ExperimentValidationError> {
    if id.is_empty() {
        return Err(ExperimentValidationError::EmptyId);
    }

    if id.len() > MAX_EXPERIMENT_ID_LENGTH {
        return Err(ExperimentValidationError::IdTooLong(MAX_EXPERIMENT_ID_LENGTH));
    }

    if let Some(ch) = id
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_'))
    {
        return Err(ExperimentValidationError::InvalidIdCharacter(ch));
    }

    Ok(())
}

/// Validate an application name
pub fn validate_application_name(name: &str) -> Result<(), ExperimentValidationError> {
    if name.trim().is_empty() {
        return Err(ExperimentValidationError::EmptyApplicationName);
    }

    if name.len() > MAX_APPLICATION_NAME_LENGTH {
        return Err(ExperimentValidationError::ApplicationNameTooLong(
            MAX_APPLICATION_NAME_LENGTH,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_experiment_ids() {
        assert!(validate_experiment_id("E1").is_ok());
        assert!(validate_experiment_id("checkout-banner_v2").is_ok());
        assert!(validate_experiment_id("0f8fad5b-d9cb-469f-a165-70867728950e").is_ok());
    }

    #[test]
    fn test_empty_experiment_id() {
        assert_eq!(
            validate_experiment_id(""),
            Err(ExperimentValidationError::EmptyId)
        );
    }

    #[test]
    fn test_experiment_id_too_long() {
        let id = "a".repeat(MAX_EXPERIMENT_ID_LENGTH + 1);
        assert_eq!(
            validate_experiment_id(&id),
            Err(ExperimentValidationError::IdTooLong(MAX_EXPERIMENT_ID_LENGTH))
        );
    }

    #[test]
    fn test_experiment_id_invalid_character() {
        assert_eq!(
            validate_experiment_id("exp 1"),
            Err(ExperimentValidationError::InvalidIdCharacter(' '))
        );
        assert_eq!(
            validate_experiment_id("exp:1"),
            Err(ExperimentValidationError::InvalidIdCharacter(':'))
        );
    }

    #[test]
    fn test_application_name() {
        assert!(validate_application_name("checkout").is_ok());
        assert_eq!(
            validate_application_name("   "),
            Err(ExperimentValidationError::EmptyApplicationName)
        );
    }
}
