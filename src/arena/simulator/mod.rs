//! The external game engine, seen from the harness.
//!
//! A [`Simulator`] is anything that can play a full match for an ordered
//! pair of agents and report a score per slot. The harness never looks at
//! game rules; it only cares about the [`ScoreMap`] that comes back.
//!
//! [`CommandSimulator`] drives a real referee program. The stubs in
//! [`stub`] are deterministic stand-ins used by tests and benchmarks.
mod command;
pub mod stub;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::arena::agent::AgentId;
use crate::arena::errors::SimulationFailure;
use crate::arena::session::HostedSession;

pub use command::{CommandSimulator, EngineConfig};
pub use stub::{ConstantSimulator, FailAfter, ScriptedSimulator};

/// One ordered match to play. `first` is submitted in slot 0 and `second`
/// in slot 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    pub first: AgentId,
    pub second: AgentId,
    /// `None` lets the engine choose.
    pub seed: Option<i64>,
    pub league_level: u32,
}

/// Scores reported by the engine, keyed by slot index.
///
/// Slots are positional. Which agent a slot belongs to depends on the order
/// the agents were submitted in, never on the agent itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMap(BTreeMap<usize, i32>);

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A two slot score map.
    pub fn from_slots(slot0: i32, slot1: i32) -> Self {
        [(0, slot0), (1, slot1)].into_iter().collect()
    }

    pub fn insert(&mut self, slot: usize, score: i32) {
        self.0.insert(slot, score);
    }

    /// The score for `slot`. A slot the engine did not report counts as 0.
    pub fn score(&self, slot: usize) -> i32 {
        self.0.get(&slot).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(slot, score)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.0.iter().map(|(slot, score)| (*slot, *score))
    }
}

impl FromIterator<(usize, i32)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (usize, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The capability the harness needs from a game engine.
///
/// Calls are synchronous. A failure is surfaced to the caller as is; the
/// harness never retries.
pub trait Simulator {
    /// Play one complete match and report the score of each slot.
    fn simulate(&mut self, request: &MatchRequest) -> Result<ScoreMap, SimulationFailure>;

    /// Hand both agents to the engine's interactive hosting. Once this has
    /// been called the engine owns the session lifecycle.
    fn host(&mut self, session: &HostedSession) -> Result<(), SimulationFailure> {
        let _ = session;
        Err(SimulationFailure::Engine(
            "this simulator does not support hosted sessions".to_string(),
        ))
    }
}

impl<S: Simulator + ?Sized> Simulator for Box<S> {
    fn simulate(&mut self, request: &MatchRequest) -> Result<ScoreMap, SimulationFailure> {
        (**self).simulate(request)
    }

    fn host(&mut self, session: &HostedSession) -> Result<(), SimulationFailure> {
        (**self).host(session)
    }
}
