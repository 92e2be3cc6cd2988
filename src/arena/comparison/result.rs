use std::path::Path;

use serde::Serialize;
use uuid::Uuid;

use crate::arena::agent::AgentId;

use super::config::ComparisonConfig;
use super::error::{ComparisonError, Result};
use super::stats::{Percentages, RunningStatistics, SlotTally};

/// Results of a finished batch comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    run_id: Uuid,
    agent_a: AgentId,
    agent_b: AgentId,
    #[serde(flatten)]
    stats: RunningStatistics,
    total_matches: usize,
    slots: SlotTally,
    num_trials: usize,
    master_seed: i64,
    league_level: u32,
}

impl ComparisonResult {
    /// Snapshot the final counters of a run.
    pub fn new(
        run_id: Uuid,
        agent_a: AgentId,
        agent_b: AgentId,
        stats: &RunningStatistics,
        slots: SlotTally,
        config: &ComparisonConfig,
    ) -> Self {
        Self {
            run_id,
            agent_a,
            agent_b,
            stats: stats.clone(),
            total_matches: config.total_matches(),
            slots,
            num_trials: config.num_trials,
            master_seed: config.master_seed,
            league_level: config.league_level,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn agent_a(&self) -> &AgentId {
        &self.agent_a
    }

    pub fn agent_b(&self) -> &AgentId {
        &self.agent_b
    }

    pub fn wins_a(&self) -> usize {
        self.stats.wins_a()
    }

    pub fn wins_b(&self) -> usize {
        self.stats.wins_b()
    }

    pub fn ties(&self) -> usize {
        self.stats.ties()
    }

    /// Individual matches played, two per trial.
    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    pub fn master_seed(&self) -> i64 {
        self.master_seed
    }

    pub fn slots(&self) -> &SlotTally {
        &self.slots
    }

    /// Final percentages over every match played.
    pub fn percentages(&self) -> Percentages {
        self.stats.percentages(self.total_matches)
    }

    /// Format results as Markdown output
    pub fn to_markdown(&self) -> String {
        let pct = self.percentages();
        let mut output = String::new();

        output.push_str(&format!("{}\n", "=".repeat(80)));
        output.push_str("# Agent Comparison Results\n");
        output.push_str(&format!("{}\n\n", "=".repeat(80)));

        output.push_str("## Configuration\n\n");
        output.push_str(&format!("- **Run**: {}\n", self.run_id));
        output.push_str(&format!("- **Agent A**: `{}`\n", self.agent_a));
        output.push_str(&format!("- **Agent B**: `{}`\n", self.agent_b));
        output.push_str(&format!("- **Mirrored Trials**: {}\n", self.num_trials));
        output.push_str(&format!(
            "- **Total Matches Played**: {}\n",
            self.total_matches
        ));
        output.push_str(&format!("- **Master Seed**: {}\n", self.master_seed));
        output.push_str(&format!("- **League Level**: {}\n", self.league_level));
        output.push('\n');

        output.push_str("## Results\n\n");
        output.push_str("| Outcome | Matches | Share |\n");
        output.push_str("|---------|---------|-------|\n");
        output.push_str(&format!(
            "| Agent A wins | {} | {:.2}% |\n",
            self.wins_a(),
            pct.agent_a
        ));
        output.push_str(&format!(
            "| Agent B wins | {} | {:.2}% |\n",
            self.wins_b(),
            pct.agent_b
        ));
        output.push_str(&format!("| Ties | {} | {:.2}% |\n", self.ties(), pct.tie));
        output.push('\n');

        output.push_str("## Seat Balance\n\n");
        output.push_str("| Slot | Wins |\n");
        output.push_str("|------|------|\n");
        output.push_str(&format!("| Slot 0 | {} |\n", self.slots.slot0_wins));
        output.push_str(&format!("| Slot 1 | {} |\n", self.slots.slot1_wins));
        output.push_str(&format!("| Tie | {} |\n", self.slots.ties));
        output.push('\n');
        output.push_str(&format!(
            "Slot 0 won {:.1}% of all matches.\n",
            self.slots.slot0_win_percent()
        ));

        output
    }

    /// Serialize the result to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ComparisonError::from)
    }

    /// Save results to JSON and Markdown files
    pub fn save_to_dir(&self, output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;

        let json_path = output_dir.join("results.json");
        std::fs::write(&json_path, self.to_json()?)?;

        let md_path = output_dir.join("results.md");
        std::fs::write(&md_path, self.to_markdown())?;

        Ok(())
    }
}
