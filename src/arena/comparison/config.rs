use std::path::PathBuf;

use crate::arena::errors::ConfigurationError;
use crate::arena::seed::DEFAULT_MASTER_SEED;
use crate::arena::session::DEFAULT_LEAGUE_LEVEL;

/// Number of mirrored trials a batch plays unless told otherwise.
pub const DEFAULT_NUM_TRIALS: usize = 200;

/// Configuration for a batch comparison of two agents
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    /// Number of mirrored trials. Each one plays two matches.
    pub num_trials: usize,
    /// Seed the per-trial seed stream is derived from
    pub master_seed: i64,
    /// League level passed to the engine for every match
    pub league_level: u32,
    /// Optional directory to save the final results to
    pub output_dir: Option<PathBuf>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            num_trials: DEFAULT_NUM_TRIALS,
            master_seed: DEFAULT_MASTER_SEED,
            league_level: DEFAULT_LEAGUE_LEVEL,
            output_dir: None,
        }
    }
}

impl ComparisonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the comparison configuration
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.num_trials == 0 {
            return Err(ConfigurationError::Validation(
                "num_trials must be greater than 0".to_string(),
            ));
        }

        if self.num_trials.checked_mul(2).is_none() {
            return Err(ConfigurationError::Validation(format!(
                "num_trials ({}) is too large",
                self.num_trials
            )));
        }

        Ok(())
    }

    /// Individual matches the batch plays: two per trial.
    pub fn total_matches(&self) -> usize {
        self.num_trials.saturating_mul(2)
    }
}
