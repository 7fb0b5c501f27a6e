use thiserror::Error;

use super::experiment::ExperimentValidationError;

/// Core domain errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed experiment definition. Fatal at registration time.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ExperimentValidationError),

    /// Query for a type that was never registered. Recoverable by the caller.
    #[error("Unknown experiment: '{experiment_type}'")]
    UnknownExperiment { experiment_type: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn unknown_experiment(experiment_type: impl Into<String>) -> Self {
        Self::UnknownExperiment {
            experiment_type: experiment_type.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_unknown_experiment(&self) -> bool {
        matches!(self, Self::UnknownExperiment { .. })
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}
