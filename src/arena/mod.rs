//! The arena is where two agents meet.
//!
//! Everything in here is built around one external capability, the
//! [`Simulator`], which plays a full match for an ordered pair of agents and
//! reports a score per slot. [`MatchRunner`] is the thin adapter every other
//! piece composes, [`MirroredTrial`] plays both orientations of one seed, and
//! [`comparison`] aggregates many trials into win percentages.
pub mod agent;
pub mod comparison;
pub mod errors;
pub mod match_runner;
pub mod mirrored;
pub mod mode;
pub mod outcome;
pub mod report;
pub mod seed;
pub mod session;
pub mod simulator;

pub use agent::AgentId;
pub use errors::{ArenaError, ConfigurationError, SimulationFailure};
pub use match_runner::MatchRunner;
pub use mirrored::{MirroredTrial, Orientation, TrialScores};
pub use mode::{BatchOptions, Mode, RunOutput, dispatch};
pub use outcome::{Outcome, classify};
pub use report::{ConsoleReporter, MatchLine, MemoryReporter, NullReporter, Reporter};
pub use seed::{DEFAULT_MASTER_SEED, Lcg48Rng, SeedSource};
pub use session::{DEFAULT_LEAGUE_LEVEL, DEFAULT_PORT, HostedSession, SessionConfig};
pub use simulator::{MatchRequest, ScoreMap, Simulator};
