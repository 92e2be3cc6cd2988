use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::arena::comparison::ComparisonError;

/// Malformed or missing invocation input. Nothing is run once one of these
/// has been produced.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Invalid mode '{0}'. Use 'start' for server mode, 'run' for console mode, or 'stat' for statistics mode")]
    InvalidMode(String),

    #[error("Invalid seed '{0}'. Please provide a valid 64-bit integer")]
    InvalidSeed(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Unable to read engine config {path}: {source}")]
    ReadEngineConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse engine config {path}: {source}")]
    ParseEngineConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The external engine could not produce a result for a match.
#[derive(Error, Debug)]
pub enum SimulationFailure {
    #[error("Failed to launch engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Engine exited with {status}: {stderr}")]
    EngineExited { status: ExitStatus, stderr: String },

    #[error("Engine output could not be parsed: {0}")]
    MalformedOutput(String),

    #[error("Engine reported a failure: {0}")]
    Engine(String),
}

/// Anything that can stop a run started through the mode dispatcher.
#[derive(Error, Debug)]
pub enum ArenaError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Simulation(#[from] SimulationFailure),

    #[error(transparent)]
    Comparison(#[from] ComparisonError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArenaError {
    /// True when the run was refused before any match was played.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ArenaError::Configuration(_)
                | ArenaError::Comparison(ComparisonError::Configuration(_))
        )
    }
}
