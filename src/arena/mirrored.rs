//! One seed, played twice with the agents swapped.
//!
//! Holding the seed fixed keeps every random game condition identical
//! between the two matches, so the only thing that changes is which agent
//! moves first. Both matches are reported separately and count as two
//! independent results.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::arena::agent::AgentId;
use crate::arena::errors::SimulationFailure;
use crate::arena::match_runner::MatchRunner;
use crate::arena::outcome::{Outcome, classify};
use crate::arena::simulator::Simulator;

/// Which of the two matches of a mirrored trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Agent A in slot 0.
    Forward,
    /// Agent B in slot 0.
    Reverse,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Forward, Orientation::Reverse];

    /// 1 for the forward match, 2 for the reverse one.
    pub fn match_number(self) -> usize {
        match self {
            Orientation::Forward => 1,
            Orientation::Reverse => 2,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Forward => f.write_str("A first"),
            Orientation::Reverse => f.write_str("B first"),
        }
    }
}

/// Scores of both matches, already normalised to agent A and agent B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialScores {
    pub seed: i64,
    pub score_a: i32,
    pub score_b: i32,
    pub reverse_score_a: i32,
    pub reverse_score_b: i32,
}

impl TrialScores {
    /// `(agent A, agent B)` scores for one orientation.
    pub fn scores(&self, orientation: Orientation) -> (i32, i32) {
        match orientation {
            Orientation::Forward => (self.score_a, self.score_b),
            Orientation::Reverse => (self.reverse_score_a, self.reverse_score_b),
        }
    }

    /// Outcome of one orientation; `XWins` means agent A won.
    pub fn outcome(&self, orientation: Orientation) -> Outcome {
        let (a, b) = self.scores(orientation);
        classify(a, b)
    }

    /// Outcome of one orientation from the slots' point of view; `XWins`
    /// means the agent in slot 0 won.
    pub fn slot_outcome(&self, orientation: Orientation) -> Outcome {
        let (a, b) = self.scores(orientation);
        match orientation {
            Orientation::Forward => classify(a, b),
            Orientation::Reverse => classify(b, a),
        }
    }
}

/// A mirrored trial failed because one of its matches did.
#[derive(Error, Debug)]
#[error("{orientation} match with seed {seed} failed: {source}")]
pub struct TrialFailure {
    pub seed: i64,
    pub orientation: Orientation,
    #[source]
    pub source: SimulationFailure,
}

/// Plays both orientations of a seed for a fixed pair of agents.
#[derive(Debug, Clone)]
pub struct MirroredTrial {
    agent_a: AgentId,
    agent_b: AgentId,
    league_level: u32,
}

impl MirroredTrial {
    pub fn new(agent_a: AgentId, agent_b: AgentId, league_level: u32) -> Self {
        Self {
            agent_a,
            agent_b,
            league_level,
        }
    }

    pub fn agent_a(&self) -> &AgentId {
        &self.agent_a
    }

    pub fn agent_b(&self) -> &AgentId {
        &self.agent_b
    }

    /// Play A-then-B and B-then-A on the same seed.
    ///
    /// If either match fails the whole trial fails and nothing from it
    /// should be recorded.
    pub fn evaluate<S: Simulator>(
        &self,
        runner: &mut MatchRunner<S>,
        seed: i64,
    ) -> Result<TrialScores, TrialFailure> {
        let forward = runner
            .run(&self.agent_a, &self.agent_b, Some(seed), self.league_level)
            .map_err(|source| TrialFailure {
                seed,
                orientation: Orientation::Forward,
                source,
            })?;

        let reverse = runner
            .run(&self.agent_b, &self.agent_a, Some(seed), self.league_level)
            .map_err(|source| TrialFailure {
                seed,
                orientation: Orientation::Reverse,
                source,
            })?;

        let scores = TrialScores {
            seed,
            score_a: forward.score(0),
            score_b: forward.score(1),
            // B sat in slot 0 for the reverse match.
            reverse_score_a: reverse.score(1),
            reverse_score_b: reverse.score(0),
        };
        trace!(?scores, "Mirrored trial finished");
        Ok(scores)
    }
}
