use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid experiment state: {message}")]
    InvalidState { message: String },

    #[error("End time has passed: {message}")]
    Expired { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn expired(message: impl Into<String>) -> Self {
        Self::Expired {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Experiment lookup failure naming the identifier
    pub fn experiment_not_found(id: impl std::fmt::Display) -> Self {
        Self::not_found(format!("Experiment '{}' not found", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::experiment_not_found("exp-1");
        assert_eq!(error.to_string(), "Not found: Experiment 'exp-1' not found");
    }

    #[test]
    fn test_invalid_state_error() {
        let error = DomainError::invalid_state("exp-1 is deleted");
        assert_eq!(
            error.to_string(),
            "Invalid experiment state: exp-1 is deleted"
        );
    }

    #[test]
    fn test_expired_error() {
        let error = DomainError::expired("exp-1");
        assert_eq!(error.to_string(), "End time has passed: exp-1");
    }
}
