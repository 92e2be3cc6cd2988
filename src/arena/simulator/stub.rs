//! Deterministic simulators that never launch anything.
//!
//! These stand in for a real engine in tests and benchmarks. Every one of
//! them remembers the requests it was given so callers can check exactly
//! what the harness asked for.
use tracing::warn;

use super::{MatchRequest, ScoreMap, Simulator};
use crate::arena::errors::SimulationFailure;
use crate::arena::session::HostedSession;

/// Returns the same two slot scores for every match, whoever plays.
#[derive(Debug, Clone, Default)]
pub struct ConstantSimulator {
    slot0: i32,
    slot1: i32,
    requests: Vec<MatchRequest>,
    hosted: Vec<HostedSession>,
}

impl ConstantSimulator {
    pub fn new(slot0: i32, slot1: i32) -> Self {
        Self {
            slot0,
            slot1,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> &[MatchRequest] {
        &self.requests
    }

    pub fn hosted(&self) -> &[HostedSession] {
        &self.hosted
    }
}

impl Simulator for ConstantSimulator {
    fn simulate(&mut self, request: &MatchRequest) -> Result<ScoreMap, SimulationFailure> {
        self.requests.push(request.clone());
        Ok(ScoreMap::from_slots(self.slot0, self.slot1))
    }

    fn host(&mut self, session: &HostedSession) -> Result<(), SimulationFailure> {
        self.hosted.push(session.clone());
        Ok(())
    }
}

/// Scores every match with a caller supplied function.
pub struct ScriptedSimulator<F> {
    script: F,
    requests: Vec<MatchRequest>,
}

impl<F> ScriptedSimulator<F>
where
    F: FnMut(&MatchRequest) -> ScoreMap,
{
    pub fn new(script: F) -> Self {
        Self {
            script,
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[MatchRequest] {
        &self.requests
    }
}

impl<F> Simulator for ScriptedSimulator<F>
where
    F: FnMut(&MatchRequest) -> ScoreMap,
{
    fn simulate(&mut self, request: &MatchRequest) -> Result<ScoreMap, SimulationFailure> {
        self.requests.push(request.clone());
        Ok((self.script)(request))
    }
}

/// Wraps another simulator and fails the `fail_on`-th match (1-based).
///
/// Calls before that one are forwarded. The failing call and every call
/// after it fail without reaching the wrapped simulator.
#[derive(Debug, Clone)]
pub struct FailAfter<S> {
    inner: S,
    fail_on: usize,
    calls: usize,
}

impl<S> FailAfter<S> {
    pub fn new(inner: S, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            calls: 0,
        }
    }

    /// Total calls seen, including the failing ones.
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Simulator> Simulator for FailAfter<S> {
    fn simulate(&mut self, request: &MatchRequest) -> Result<ScoreMap, SimulationFailure> {
        self.calls += 1;
        if self.calls >= self.fail_on {
            warn!(call = self.calls, "FailAfter intentionally returning error");
            return Err(SimulationFailure::Engine(format!(
                "injected failure on call {}",
                self.calls
            )));
        }
        self.inner.simulate(request)
    }

    fn host(&mut self, session: &HostedSession) -> Result<(), SimulationFailure> {
        self.inner.host(session)
    }
}
