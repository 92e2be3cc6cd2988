use tracing::{error, event, info};
use uuid::Uuid;

use crate::arena::agent::AgentId;
use crate::arena::errors::ConfigurationError;
use crate::arena::match_runner::MatchRunner;
use crate::arena::mirrored::{MirroredTrial, Orientation};
use crate::arena::report::{MatchLine, Reporter};
use crate::arena::seed::SeedSource;
use crate::arena::simulator::Simulator;

use super::config::ComparisonConfig;
use super::error::{ComparisonError, Result};
use super::result::ComparisonResult;
use super::stats::{RunningStatistics, SlotTally};

const LOG_INTERVAL: usize = 50;

/// Runs a batch of mirrored trials between two agents
///
/// For every trial:
/// 1. Draw the next seed from the master seed stream
/// 2. Play agent A first, then agent B first, on that seed
/// 3. Record both outcomes and report both matches
///
/// A failed match aborts the whole batch. Statistics never include a trial
/// that did not finish.
#[derive(Debug, Clone)]
pub struct ArenaComparison {
    config: ComparisonConfig,
    agent_a: AgentId,
    agent_b: AgentId,
}

impl ArenaComparison {
    /// Create a new ArenaComparison (internal - use ComparisonBuilder instead)
    pub(crate) fn new(config: ComparisonConfig, agent_a: AgentId, agent_b: AgentId) -> Self {
        Self {
            config,
            agent_a,
            agent_b,
        }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn agent_a(&self) -> &AgentId {
        &self.agent_a
    }

    pub fn agent_b(&self) -> &AgentId {
        &self.agent_b
    }

    /// Individual matches the batch will play
    pub fn total_matches(&self) -> usize {
        self.config.total_matches()
    }

    /// Run the comparison with fresh statistics
    pub fn run<S, R>(
        &self,
        runner: &mut MatchRunner<S>,
        reporter: &mut R,
    ) -> Result<ComparisonResult>
    where
        S: Simulator,
        R: Reporter + ?Sized,
    {
        let mut stats = RunningStatistics::new();
        self.run_with_stats(runner, &mut stats, reporter)
    }

    /// Run the comparison, recording into caller owned statistics.
    ///
    /// `stats` must start empty, since match numbers and per-line
    /// percentages count from the first match of this run. When the batch
    /// aborts, `stats` holds exactly the outcomes of the trials that
    /// finished, reporter failures included.
    pub fn run_with_stats<S, R>(
        &self,
        runner: &mut MatchRunner<S>,
        stats: &mut RunningStatistics,
        reporter: &mut R,
    ) -> Result<ComparisonResult>
    where
        S: Simulator,
        R: Reporter + ?Sized,
    {
        self.config.validate()?;
        if stats.total_recorded() != 0 {
            return Err(ConfigurationError::Validation(format!(
                "statistics must start empty, found {} recorded outcomes",
                stats.total_recorded()
            ))
            .into());
        }

        let run_id = Uuid::now_v7();
        event!(
            tracing::Level::INFO,
            %run_id,
            agent_a = %self.agent_a,
            agent_b = %self.agent_b,
            num_trials = self.config.num_trials,
            master_seed = self.config.master_seed,
            league_level = self.config.league_level,
            "Starting agent comparison"
        );

        let trial = MirroredTrial::new(
            self.agent_a.clone(),
            self.agent_b.clone(),
            self.config.league_level,
        );
        let mut seeds = SeedSource::new(self.config.master_seed);
        let mut slots = SlotTally::default();

        for trial_idx in 0..self.config.num_trials {
            if trial_idx > 0 && trial_idx % LOG_INTERVAL == 0 {
                let percent = trial_idx as f64 * 100.0 / self.config.num_trials as f64;
                info!(
                    %run_id,
                    trials_done = trial_idx,
                    num_trials = self.config.num_trials,
                    "Progress: {:.1}%",
                    percent
                );
            }

            let seed = seeds.next_seed();
            event!(tracing::Level::DEBUG, trial_idx, seed, "Starting mirrored trial");

            let scores = trial.evaluate(runner, seed).map_err(|source| {
                error!(
                    %run_id,
                    trial = trial_idx,
                    seed = source.seed,
                    orientation = %source.orientation,
                    error = %source.source,
                    "Mirrored trial failed, aborting batch"
                );
                ComparisonError::Simulation {
                    trial: trial_idx,
                    source,
                }
            })?;

            // Both matches are recorded before either is reported, so a
            // failing reporter never leaves half a trial in `stats`.
            let lines = Orientation::BOTH.map(|orientation| {
                stats.record(scores.outcome(orientation));
                slots.record(scores.slot_outcome(orientation));

                let match_number = trial_idx * 2 + orientation.match_number();
                let (score_a, score_b) = scores.scores(orientation);
                MatchLine {
                    trial: trial_idx,
                    match_number,
                    orientation,
                    seed,
                    score_a,
                    score_b,
                    percentages: stats.percentages(match_number),
                }
            });
            for line in &lines {
                reporter.match_completed(line)?;
            }
        }

        let result = ComparisonResult::new(
            run_id,
            self.agent_a.clone(),
            self.agent_b.clone(),
            stats,
            slots,
            &self.config,
        );
        reporter.finished(&result)?;

        if let Some(output_dir) = &self.config.output_dir {
            result.save_to_dir(output_dir)?;
            info!(%run_id, output_dir = %output_dir.display(), "Saved comparison results");
        }

        event!(
            tracing::Level::INFO,
            %run_id,
            wins_a = result.wins_a(),
            wins_b = result.wins_b(),
            ties = result.ties(),
            "Finished agent comparison"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::arena::comparison::ComparisonBuilder;
    use crate::arena::mirrored::TrialScores;
    use crate::arena::report::{MemoryReporter, NullReporter};
    use crate::arena::simulator::{
        ConstantSimulator, FailAfter, MatchRequest, ScoreMap, ScriptedSimulator,
    };

    fn comparison(num_trials: usize) -> ArenaComparison {
        ComparisonBuilder::new()
            .agent_a("./bot_a")
            .agent_b("./bot_b")
            .num_trials(num_trials)
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn test_first_mover_engine_splits_evenly() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));
        let mut reporter = MemoryReporter::default();

        let result = comparison(200).run(&mut runner, &mut reporter).unwrap();

        assert_eq!(result.total_matches(), 400);
        assert_eq!(result.wins_a(), 200);
        assert_eq!(result.wins_b(), 200);
        assert_eq!(result.ties(), 0);

        let pct = result.percentages();
        assert_relative_eq!(pct.agent_a, 50.0);
        assert_relative_eq!(pct.agent_b, 50.0);
        assert_relative_eq!(pct.tie, 0.0);

        // Every match was won by slot 0.
        assert_eq!(result.slots().slot0_wins, 400);

        let summary = reporter.summary.unwrap();
        assert!(summary.contains("Agent A Win Percentage: 50.00%"));
        assert!(summary.contains("Agent B Win Percentage: 50.00%"));
        assert!(summary.contains("Tie Percentage: 0.00%"));
    }

    #[test]
    fn test_seeds_follow_master_seed_stream() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(0, 0));
        comparison(5).run(&mut runner, &mut NullReporter).unwrap();

        let expected: Vec<i64> = SeedSource::new(12345).take(5).collect();
        let requests = runner.simulator().requests();
        assert_eq!(requests.len(), 10);
        for (idx, pair) in requests.chunks(2).enumerate() {
            assert_eq!(pair[0].seed, Some(expected[idx]));
            assert_eq!(pair[1].seed, Some(expected[idx]));
        }
    }

    #[test]
    fn test_failure_on_fifth_match_keeps_four_outcomes() {
        let mut runner = MatchRunner::new(FailAfter::new(ConstantSimulator::new(1, 0), 5));
        let mut stats = RunningStatistics::new();
        let mut reporter = MemoryReporter::default();

        let err = comparison(200)
            .run_with_stats(&mut runner, &mut stats, &mut reporter)
            .unwrap_err();

        match err {
            ComparisonError::Simulation { trial, source } => {
                assert_eq!(trial, 2);
                assert_eq!(source.orientation, Orientation::Forward);
            }
            other => panic!("Expected simulation failure, got {:?}", other),
        }
        assert_eq!(stats.total_recorded(), 4);
        assert_eq!(reporter.lines.len(), 4);
        assert!(reporter.summary.is_none());
        assert_eq!(runner.matches_started(), 5);
    }

    #[test]
    fn test_failed_reverse_match_records_nothing_for_its_trial() {
        let mut runner = MatchRunner::new(FailAfter::new(ConstantSimulator::new(1, 0), 6));
        let mut stats = RunningStatistics::new();

        let err = comparison(10)
            .run_with_stats(&mut runner, &mut stats, &mut NullReporter)
            .unwrap_err();

        assert!(matches!(err, ComparisonError::Simulation { trial: 2, .. }));
        // The forward match of trial 2 finished but is not recorded.
        assert_eq!(stats.total_recorded(), 4);
    }

    #[test]
    fn test_running_percentages_use_match_count() {
        // Agent A always wins by one.
        let mut runner = MatchRunner::new(ScriptedSimulator::new(|req: &MatchRequest| {
            if req.first.as_str() == "./bot_a" {
                ScoreMap::from_slots(2, 1)
            } else {
                ScoreMap::from_slots(1, 2)
            }
        }));
        let mut reporter = MemoryReporter::default();
        comparison(3).run(&mut runner, &mut reporter).unwrap();

        let numbers: Vec<usize> = reporter.lines.iter().map(|l| l.match_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        for line in &reporter.lines {
            assert_relative_eq!(line.percentages.agent_a, 100.0);
            assert_eq!((line.score_a, line.score_b), (2, 1));
        }
        assert_eq!(reporter.lines[1].orientation, Orientation::Reverse);
        assert_eq!(reporter.lines[1].seed, reporter.lines[0].seed);
    }

    #[test]
    fn test_lines_report_state_at_emission() {
        // Forward matches are ties, reverse matches go to slot 0 (agent B).
        let mut runner = MatchRunner::new(ScriptedSimulator::new(|req: &MatchRequest| {
            if req.first.as_str() == "./bot_a" {
                ScoreMap::from_slots(0, 0)
            } else {
                ScoreMap::from_slots(1, 0)
            }
        }));
        let mut reporter = MemoryReporter::default();
        comparison(2).run(&mut runner, &mut reporter).unwrap();

        let ties: Vec<f64> = reporter.lines.iter().map(|l| l.percentages.tie).collect();
        assert_relative_eq!(ties[0], 100.0);
        assert_relative_eq!(ties[1], 50.0);
        assert_relative_eq!(ties[2], 200.0 / 3.0);
        assert_relative_eq!(ties[3], 50.0);
    }

    #[test]
    fn test_deterministic_with_master_seed() {
        let script = |req: &MatchRequest| {
            let seed = req.seed.unwrap_or_default();
            let bias = if req.first.as_str() == "./bot_a" { 1 } else { 0 };
            ScoreMap::from_slots((seed.rem_euclid(3)) as i32 + bias, (seed.rem_euclid(5)) as i32)
        };

        let run_once = || {
            let mut runner = MatchRunner::new(ScriptedSimulator::new(script));
            let mut reporter = MemoryReporter::default();
            let result = comparison(40).run(&mut runner, &mut reporter).unwrap();
            (result.wins_a(), result.wins_b(), result.ties(), reporter.lines)
        };

        assert_eq!(run_once(), run_once());
    }

    #[test]
    fn test_zero_trials_is_configuration_error() {
        let comparison = ArenaComparison::new(
            crate::arena::comparison::ComparisonConfig {
                num_trials: 0,
                ..Default::default()
            },
            AgentId::from("a"),
            AgentId::from("b"),
        );
        let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));

        let err = comparison.run(&mut runner, &mut NullReporter).unwrap_err();
        assert!(matches!(err, ComparisonError::Configuration(_)));
        assert_eq!(runner.matches_started(), 0);
    }

    #[test]
    fn test_writes_results_when_output_dir_set() {
        let dir = std::env::temp_dir().join(format!("duel_arena_runner_{}", std::process::id()));
        let comparison = ComparisonBuilder::new()
            .agent_a("a")
            .agent_b("b")
            .num_trials(2)
            .output_dir(&dir)
            .build()
            .unwrap();
        let mut runner = MatchRunner::new(ConstantSimulator::new(3, 3));

        let result = comparison.run(&mut runner, &mut NullReporter).unwrap();
        assert_eq!(result.ties(), 4);
        assert!(dir.join("results.json").exists());
        assert!(dir.join("results.md").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_trial_scores_match_reported_lines() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(4, 9));
        let mut reporter = MemoryReporter::default();
        comparison(1).run(&mut runner, &mut reporter).unwrap();

        let scores = TrialScores {
            seed: reporter.lines[0].seed,
            score_a: 4,
            score_b: 9,
            reverse_score_a: 9,
            reverse_score_b: 4,
        };
        assert_eq!(
            (reporter.lines[0].score_a, reporter.lines[0].score_b),
            scores.scores(Orientation::Forward)
        );
        assert_eq!(
            (reporter.lines[1].score_a, reporter.lines[1].score_b),
            scores.scores(Orientation::Reverse)
        );
    }

    #[test]
    fn test_prefilled_statistics_are_rejected() {
        let mut stats = RunningStatistics::new();
        for _ in 0..5 {
            stats.record(crate::arena::Outcome::XWins);
        }
        let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));

        let err = comparison(1)
            .run_with_stats(&mut runner, &mut stats, &mut NullReporter)
            .unwrap_err();

        assert!(matches!(
            err,
            ComparisonError::Configuration(ConfigurationError::Validation(_))
        ));
        assert_eq!(runner.matches_started(), 0);
        assert_eq!(stats.total_recorded(), 5);
    }

    #[test]
    fn test_final_percentages_use_configured_match_count() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));
        let mut reporter = MemoryReporter::default();

        let result = comparison(1).run(&mut runner, &mut reporter).unwrap();

        assert_eq!(result.total_matches(), 2);
        for line in &reporter.lines {
            assert!(line.percentages.agent_a <= 100.0);
            assert!(line.percentages.agent_b <= 100.0);
        }
        assert_relative_eq!(result.percentages().agent_a, 50.0);
        assert_relative_eq!(result.percentages().agent_b, 50.0);
    }

    /// Accepts `ok_lines` match lines, then fails like a closed pipe.
    struct BrokenPipeReporter {
        ok_lines: usize,
        seen: usize,
    }

    impl Reporter for BrokenPipeReporter {
        fn match_completed(&mut self, _line: &MatchLine) -> std::io::Result<()> {
            self.seen += 1;
            if self.seen > self.ok_lines {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "stdout closed",
                ));
            }
            Ok(())
        }

        fn finished(&mut self, _result: &ComparisonResult) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_reporter_failure_keeps_whole_trials() {
        for ok_lines in [0, 1, 2, 3] {
            let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));
            let mut stats = RunningStatistics::new();
            let mut reporter = BrokenPipeReporter { ok_lines, seen: 0 };

            let err = comparison(5)
                .run_with_stats(&mut runner, &mut stats, &mut reporter)
                .unwrap_err();

            assert!(matches!(err, ComparisonError::Io(_)));
            assert_eq!(stats.total_recorded() % 2, 0);
            assert_eq!(stats.total_recorded(), (ok_lines / 2 + 1) * 2);
        }
    }
}
