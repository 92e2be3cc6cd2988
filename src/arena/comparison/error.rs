use thiserror::Error;

use crate::arena::errors::ConfigurationError;
use crate::arena::mirrored::TrialFailure;

/// Errors that can occur during a batch comparison
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Trial {trial} aborted the batch: {source}")]
    Simulation {
        trial: usize,
        #[source]
        source: TrialFailure,
    },

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, ComparisonError>;
