use std::path::{Path, PathBuf};

use crate::arena::agent::AgentId;
use crate::arena::errors::ConfigurationError;
use crate::arena::session::SessionConfig;

use super::config::ComparisonConfig;
use super::error::Result;
use super::runner::ArenaComparison;

/// Builder for constructing ArenaComparison instances
///
/// # Example
///
/// ```
/// use duel_arena::arena::comparison::ComparisonBuilder;
///
/// let comparison = ComparisonBuilder::new()
///     .agent_a("./bots/challenger")
///     .agent_b("./bots/champion")
///     .num_trials(500)
///     .master_seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(comparison.total_matches(), 1000);
/// ```
#[derive(Debug, Default)]
pub struct ComparisonBuilder {
    agent_a: Option<AgentId>,
    agent_b: Option<AgentId>,
    num_trials: Option<usize>,
    master_seed: Option<i64>,
    league_level: Option<u32>,
    output_dir: Option<PathBuf>,
}

impl ComparisonBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the agents and league level of a session.
    ///
    /// The session's seed override is deliberately not carried over: batch
    /// runs always draw their seeds from the master seed.
    pub fn from_session(session: &SessionConfig) -> Self {
        Self::new()
            .agent_a(session.agent_a.clone())
            .agent_b(session.agent_b.clone())
            .league_level(session.league_level)
    }

    pub fn agent_a(mut self, agent: impl Into<AgentId>) -> Self {
        self.agent_a = Some(agent.into());
        self
    }

    pub fn agent_b(mut self, agent: impl Into<AgentId>) -> Self {
        self.agent_b = Some(agent.into());
        self
    }

    /// Set the number of mirrored trials
    pub fn num_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = Some(num_trials);
        self
    }

    /// Set the master seed of the per-trial seed stream
    pub fn master_seed(mut self, master_seed: i64) -> Self {
        self.master_seed = Some(master_seed);
        self
    }

    pub fn league_level(mut self, league_level: u32) -> Self {
        self.league_level = Some(league_level);
        self
    }

    /// Set the output directory for the result files
    pub fn output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = Some(output_dir.as_ref().to_path_buf());
        self
    }

    /// Build the comparison, validating the configuration
    pub fn build(self) -> Result<ArenaComparison> {
        let agent_a = self
            .agent_a
            .ok_or(ConfigurationError::Missing("agent_a"))?;
        let agent_b = self
            .agent_b
            .ok_or(ConfigurationError::Missing("agent_b"))?;

        let defaults = ComparisonConfig::default();
        let config = ComparisonConfig {
            num_trials: self.num_trials.unwrap_or(defaults.num_trials),
            master_seed: self.master_seed.unwrap_or(defaults.master_seed),
            league_level: self.league_level.unwrap_or(defaults.league_level),
            output_dir: self.output_dir,
        };
        config.validate()?;

        Ok(ArenaComparison::new(config, agent_a, agent_b))
    }
}
