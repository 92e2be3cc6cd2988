use serde::{Deserialize, Serialize};

use crate::arena::outcome::Outcome;

/// Point-in-time win and tie percentages, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentages {
    pub agent_a: f64,
    pub agent_b: f64,
    pub tie: f64,
}

/// Cumulative A-win, B-win and tie counts for one batch run.
///
/// Every recorded outcome increments exactly one counter, so
/// `wins_a + wins_b + ties` always equals the number of
/// [`RunningStatistics::record`] calls. Percentages are computed on demand
/// from the counters; nothing is cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningStatistics {
    wins_a: usize,
    wins_b: usize,
    ties: usize,
}

impl RunningStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Outcome::XWins` is a win for agent A, `Outcome::YWins` for agent B.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::XWins => self.wins_a += 1,
            Outcome::YWins => self.wins_b += 1,
            Outcome::Tie => self.ties += 1,
        }
    }

    pub fn wins_a(&self) -> usize {
        self.wins_a
    }

    pub fn wins_b(&self) -> usize {
        self.wins_b
    }

    pub fn ties(&self) -> usize {
        self.ties
    }

    pub fn total_recorded(&self) -> usize {
        self.wins_a + self.wins_b + self.ties
    }

    /// `100 * count / total` for each counter.
    ///
    /// `total` is whatever the caller counts as completed so far. A total
    /// of zero yields all zeros.
    pub fn percentages(&self, total: usize) -> Percentages {
        if total == 0 {
            return Percentages::default();
        }
        let pct = |count: usize| count as f64 * 100.0 / total as f64;
        Percentages {
            agent_a: pct(self.wins_a),
            agent_b: pct(self.wins_b),
            tie: pct(self.ties),
        }
    }
}

/// How often each slot won, regardless of which agent sat in it.
///
/// Mirrored trials put each agent in each slot equally often, so a lopsided
/// tally here points at a first-mover advantage in the game itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTally {
    pub slot0_wins: usize,
    pub slot1_wins: usize,
    pub ties: usize,
}

impl SlotTally {
    /// `Outcome::XWins` means the agent in slot 0 won.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::XWins => self.slot0_wins += 1,
            Outcome::YWins => self.slot1_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.slot0_wins + self.slot1_wins + self.ties
    }

    /// Share of matches won by slot 0, in percent.
    pub fn slot0_win_percent(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.slot0_wins as f64 * 100.0 / self.total() as f64
        }
    }
}
