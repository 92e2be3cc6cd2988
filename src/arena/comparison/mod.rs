//! Batch comparison of two agents
//!
//! This module runs many mirrored trials between two agents and keeps
//! running win and tie percentages. Every trial draws one seed from a
//! stream derived from the master seed and plays it twice, once with each
//! agent moving first, so positional bias cancels out over the run.
//!
//! # Example
//!
//! ```
//! use duel_arena::arena::comparison::ComparisonBuilder;
//! use duel_arena::arena::simulator::ConstantSimulator;
//! use duel_arena::arena::{ConsoleReporter, MatchRunner};
//!
//! let comparison = ComparisonBuilder::new()
//!     .agent_a("./bot_a")
//!     .agent_b("./bot_b")
//!     .num_trials(200)
//!     .master_seed(12345)
//!     .build()
//!     .unwrap();
//!
//! // An engine where slot 0 always wins.
//! let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));
//! let mut reporter = ConsoleReporter::new(Vec::new());
//! let result = comparison.run(&mut runner, &mut reporter).unwrap();
//!
//! assert_eq!(result.percentages().agent_a, 50.0);
//! println!("{}", result.to_markdown());
//! ```

mod builder;
mod config;
mod error;
mod result;
mod runner;
mod stats;

pub use builder::ComparisonBuilder;
pub use config::{ComparisonConfig, DEFAULT_NUM_TRIALS};
pub use error::{ComparisonError, Result};
pub use result::ComparisonResult;
pub use runner::ArenaComparison;
pub use stats::{Percentages, RunningStatistics, SlotTally};
