use serde::{Deserialize, Serialize};

use crate::arena::agent::AgentId;
use crate::arena::errors::ConfigurationError;
use crate::arena::simulator::MatchRequest;

/// League the engine is asked to play unless told otherwise.
pub const DEFAULT_LEAGUE_LEVEL: u32 = 5;
/// Port a hosted session listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 8888;

/// What every mode shares: who plays, at which level, and an optional
/// fixed seed for hosted and single runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub agent_a: AgentId,
    pub agent_b: AgentId,
    pub league_level: u32,
    pub seed: Option<i64>,
    pub port: u16,
}

impl SessionConfig {
    pub fn new(agent_a: impl Into<AgentId>, agent_b: impl Into<AgentId>) -> Self {
        Self {
            agent_a: agent_a.into(),
            agent_b: agent_b.into(),
            league_level: DEFAULT_LEAGUE_LEVEL,
            seed: None,
            port: DEFAULT_PORT,
        }
    }

    pub fn with_seed(mut self, seed: Option<i64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_league_level(mut self, league_level: u32) -> Self {
        self.league_level = league_level;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// The one match a single run plays: agent A in slot 0.
    pub fn single_request(&self) -> MatchRequest {
        MatchRequest {
            first: self.agent_a.clone(),
            second: self.agent_b.clone(),
            seed: self.seed,
            league_level: self.league_level,
        }
    }

    pub fn hosted_session(&self) -> HostedSession {
        HostedSession {
            agent_a: self.agent_a.clone(),
            agent_b: self.agent_b.clone(),
            league_level: self.league_level,
            seed: self.seed,
            port: self.port,
        }
    }
}

/// Everything the engine needs to host an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedSession {
    pub agent_a: AgentId,
    pub agent_b: AgentId,
    pub league_level: u32,
    pub seed: Option<i64>,
    pub port: u16,
}

/// Parse a seed override given on the command line.
pub fn parse_seed(raw: &str) -> Result<i64, ConfigurationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ConfigurationError::InvalidSeed(raw.to_string()))
}
