//! # duel_arena
//!
//! A harness for evaluating two agents against each other inside an
//! external two-player game simulator.
//!
//! The simulator itself is a black box reached through the
//! [`arena::Simulator`] trait. On top of it the crate provides three modes:
//!
//! - **hosted**: hand both agents to the simulator's interactive hosting.
//! - **single**: play one match and print the slot scores.
//! - **batch**: play many mirrored, seeded trials and keep running win
//!   percentages. Every seed is played twice with the agents swapped so a
//!   first-mover advantage cancels out.
//!
//! ```
//! use duel_arena::arena::comparison::ComparisonBuilder;
//! use duel_arena::arena::simulator::ConstantSimulator;
//! use duel_arena::arena::{MatchRunner, NullReporter};
//!
//! let comparison = ComparisonBuilder::new()
//!     .agent_a("./bot_a")
//!     .agent_b("./bot_b")
//!     .num_trials(10)
//!     .build()
//!     .unwrap();
//!
//! let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));
//! let result = comparison.run(&mut runner, &mut NullReporter).unwrap();
//! assert_eq!(result.total_matches(), 20);
//! ```
pub mod arena;
