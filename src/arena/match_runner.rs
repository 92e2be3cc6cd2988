use tracing::{debug, event};

use crate::arena::agent::AgentId;
use crate::arena::errors::SimulationFailure;
use crate::arena::session::HostedSession;
use crate::arena::simulator::{MatchRequest, ScoreMap, Simulator};

/// Plays single matches on a [`Simulator`].
///
/// The order of the two agents decides the slots: the first agent is
/// submitted in slot 0 and the second in slot 1. Failures are returned as
/// is; there are no retries.
#[derive(Debug)]
pub struct MatchRunner<S> {
    simulator: S,
    matches_started: usize,
}

impl<S: Simulator> MatchRunner<S> {
    pub fn new(simulator: S) -> Self {
        Self {
            simulator,
            matches_started: 0,
        }
    }

    pub fn run(
        &mut self,
        first: &AgentId,
        second: &AgentId,
        seed: Option<i64>,
        league_level: u32,
    ) -> Result<ScoreMap, SimulationFailure> {
        self.run_request(&MatchRequest {
            first: first.clone(),
            second: second.clone(),
            seed,
            league_level,
        })
    }

    pub fn run_request(&mut self, request: &MatchRequest) -> Result<ScoreMap, SimulationFailure> {
        self.matches_started += 1;
        event!(
            tracing::Level::TRACE,
            first = %request.first,
            second = %request.second,
            seed = ?request.seed,
            league_level = request.league_level,
            "Starting match"
        );

        let scores = self.simulator.simulate(request)?;

        debug!(
            seed = ?request.seed,
            slot0 = scores.score(0),
            slot1 = scores.score(1),
            "Match finished"
        );
        Ok(scores)
    }

    /// Hand a session to the engine's hosting. Not counted as a match.
    pub fn host(&mut self, session: &HostedSession) -> Result<(), SimulationFailure> {
        self.simulator.host(session)
    }

    /// Number of matches handed to the simulator so far, failed ones
    /// included.
    pub fn matches_started(&self) -> usize {
        self.matches_started
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    pub fn into_inner(self) -> S {
        self.simulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::simulator::{ConstantSimulator, FailAfter, ScriptedSimulator};

    #[test]
    fn test_first_agent_takes_slot_zero() {
        let a = AgentId::from("a");
        let b = AgentId::from("b");
        // Slot 0 scores 10 only when "a" is submitted first.
        let mut runner = MatchRunner::new(ScriptedSimulator::new(|req: &MatchRequest| {
            if req.first.as_str() == "a" {
                ScoreMap::from_slots(10, 0)
            } else {
                ScoreMap::from_slots(0, 10)
            }
        }));

        assert_eq!(runner.run(&a, &b, Some(1), 5).unwrap().score(0), 10);
        assert_eq!(runner.run(&b, &a, Some(1), 5).unwrap().score(1), 10);
        assert_eq!(runner.matches_started(), 2);
    }

    #[test]
    fn test_request_is_forwarded_unchanged() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(2, 3));
        runner
            .run(&AgentId::from("x"), &AgentId::from("y"), None, 4)
            .unwrap();

        let request = &runner.simulator().requests()[0];
        assert_eq!(request.first.as_str(), "x");
        assert_eq!(request.second.as_str(), "y");
        assert_eq!(request.seed, None);
        assert_eq!(request.league_level, 4);
    }

    #[test]
    fn test_failure_propagates_and_still_counts() {
        let mut runner = MatchRunner::new(FailAfter::new(ConstantSimulator::new(1, 0), 1));
        let result = runner.run(&AgentId::from("a"), &AgentId::from("b"), Some(5), 5);

        assert!(matches!(result, Err(SimulationFailure::Engine(_))));
        assert_eq!(runner.matches_started(), 1);
    }

    #[test]
    fn test_host_is_not_a_match() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(0, 0));
        let session = HostedSession {
            agent_a: AgentId::from("a"),
            agent_b: AgentId::from("b"),
            league_level: 5,
            seed: Some(1),
            port: 8888,
        };
        runner.host(&session).unwrap();

        assert_eq!(runner.matches_started(), 0);
        assert_eq!(runner.into_inner().hosted(), &[session]);
    }
}
