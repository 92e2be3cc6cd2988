//! Picks one of the three ways of running the harness.
//!
//! The mode is chosen once per invocation and never changes. An unknown
//! selector is refused before any match is played.
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::arena::comparison::{ComparisonBuilder, ComparisonResult, DEFAULT_NUM_TRIALS};
use crate::arena::errors::{ArenaError, ConfigurationError};
use crate::arena::match_runner::MatchRunner;
use crate::arena::report::{ConsoleReporter, format_single_result};
use crate::arena::seed::DEFAULT_MASTER_SEED;
use crate::arena::session::SessionConfig;
use crate::arena::simulator::{ScoreMap, Simulator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Hand the session to the engine's interactive hosting.
    Hosted,
    /// Play one match and print the slot scores.
    Single,
    /// Play mirrored trials and print running statistics.
    Batch,
}

impl FromStr for Mode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "host" | "hosted" => Ok(Mode::Hosted),
            "run" | "single" => Ok(Mode::Single),
            "stat" | "batch" => Ok(Mode::Batch),
            _ => Err(ConfigurationError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Hosted => f.write_str("hosted"),
            Mode::Single => f.write_str("single"),
            Mode::Batch => f.write_str("batch"),
        }
    }
}

/// Knobs that only matter to batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub num_trials: usize,
    pub master_seed: i64,
    pub output_dir: Option<PathBuf>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            num_trials: DEFAULT_NUM_TRIALS,
            master_seed: DEFAULT_MASTER_SEED,
            output_dir: None,
        }
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub enum RunOutput {
    /// The engine took over; nothing was observed.
    Hosted,
    Single(ScoreMap),
    Batch(ComparisonResult),
}

/// Runs whichever mode the selector names, writing report lines to `out`.
///
/// The selector is parsed before anything else happens, so an invalid one
/// never reaches the simulator.
pub fn dispatch<S, W>(
    selector: &str,
    session: &SessionConfig,
    batch: &BatchOptions,
    runner: &mut MatchRunner<S>,
    out: &mut W,
) -> Result<RunOutput, ArenaError>
where
    S: Simulator,
    W: Write,
{
    let mode: Mode = selector.parse()?;
    info!(%mode, agent_a = %session.agent_a, agent_b = %session.agent_b, "Dispatching run");

    match mode {
        Mode::Hosted => run_hosted(session, runner),
        Mode::Single => run_single(session, runner, out),
        Mode::Batch => run_batch(session, batch, runner, out),
    }
}

pub fn run_hosted<S: Simulator>(
    session: &SessionConfig,
    runner: &mut MatchRunner<S>,
) -> Result<RunOutput, ArenaError> {
    let hosted = session.hosted_session();
    info!(port = hosted.port, seed = ?hosted.seed, "Starting hosted session");
    runner.host(&hosted)?;
    Ok(RunOutput::Hosted)
}

pub fn run_single<S: Simulator, W: Write>(
    session: &SessionConfig,
    runner: &mut MatchRunner<S>,
    out: &mut W,
) -> Result<RunOutput, ArenaError> {
    let scores = runner.run_request(&session.single_request())?;
    writeln!(out, "{}", format_single_result(&scores))?;
    Ok(RunOutput::Single(scores))
}

/// The batch always seeds from `batch.master_seed`; a single-match seed
/// override in `session` is ignored.
pub fn run_batch<S: Simulator, W: Write>(
    session: &SessionConfig,
    batch: &BatchOptions,
    runner: &mut MatchRunner<S>,
    out: &mut W,
) -> Result<RunOutput, ArenaError> {
    let mut builder = ComparisonBuilder::from_session(session)
        .num_trials(batch.num_trials)
        .master_seed(batch.master_seed);
    if let Some(dir) = &batch.output_dir {
        builder = builder.output_dir(dir);
    }
    let comparison = builder.build()?;

    let mut reporter = ConsoleReporter::new(out);
    let result = comparison.run(runner, &mut reporter)?;
    Ok(RunOutput::Batch(result))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::arena::AgentId;
    use crate::arena::simulator::{ConstantSimulator, FailAfter};

    fn session() -> SessionConfig {
        SessionConfig::new("./a", "./b")
    }

    #[test]
    fn test_parse_mode_aliases() {
        assert_eq!("start".parse::<Mode>().unwrap(), Mode::Hosted);
        assert_eq!("HOSTED".parse::<Mode>().unwrap(), Mode::Hosted);
        assert_eq!("run".parse::<Mode>().unwrap(), Mode::Single);
        assert_eq!("Single".parse::<Mode>().unwrap(), Mode::Single);
        assert_eq!("stat".parse::<Mode>().unwrap(), Mode::Batch);
        assert_eq!("batch".parse::<Mode>().unwrap(), Mode::Batch);
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn test_bogus_mode_runs_nothing() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));
        let mut out = Vec::new();

        let err = dispatch(
            "bogus",
            &session(),
            &BatchOptions::default(),
            &mut runner,
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ArenaError::Configuration(ConfigurationError::InvalidMode(ref m)) if m == "bogus"
        ));
        assert!(err.is_configuration());
        assert_eq!(runner.matches_started(), 0);
        assert!(runner.simulator().hosted().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_prints_scores() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(12, 3));
        let mut out = Vec::new();
        let session = session().with_seed(Some(42));

        let output = dispatch("run", &session, &BatchOptions::default(), &mut runner, &mut out)
            .unwrap();

        assert!(matches!(output, RunOutput::Single(ref s) if s == &ScoreMap::from_slots(12, 3)));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Game finished!\nScores:\nAgent 0: 12\nAgent 1: 3\n"
        );
        let requests = runner.simulator().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].seed, Some(42));
        assert_eq!(requests[0].first, AgentId::from("./a"));
    }

    #[test]
    fn test_single_failure_surfaces() {
        let mut runner = MatchRunner::new(FailAfter::new(ConstantSimulator::new(1, 0), 1));
        let mut out = Vec::new();

        let err = dispatch(
            "single",
            &session(),
            &BatchOptions::default(),
            &mut runner,
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, ArenaError::Simulation(_)));
        assert!(!err.is_configuration());
        assert!(out.is_empty());
    }

    #[test]
    fn test_hosted_hands_off_session() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));
        let mut out = Vec::new();
        let session = session().with_seed(Some(9)).with_port(7777);

        let output =
            dispatch("start", &session, &BatchOptions::default(), &mut runner, &mut out).unwrap();

        assert!(matches!(output, RunOutput::Hosted));
        assert_eq!(runner.matches_started(), 0);
        let hosted = runner.simulator().hosted();
        assert_eq!(hosted.len(), 1);
        assert_eq!(hosted[0].port, 7777);
        assert_eq!(hosted[0].seed, Some(9));
        assert_eq!(hosted[0].league_level, 5);
    }

    #[test_log::test]
    fn test_batch_ignores_single_seed_override() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));
        let mut out = Vec::new();
        let session = session().with_seed(Some(1));
        let batch = BatchOptions {
            num_trials: 200,
            ..Default::default()
        };

        let output = dispatch("stat", &session, &batch, &mut runner, &mut out).unwrap();

        let result = match output {
            RunOutput::Batch(result) => result,
            other => panic!("Expected batch output, got {:?}", other),
        };
        let pct = result.percentages();
        assert_relative_eq!(pct.agent_a, 50.0);
        assert_relative_eq!(pct.agent_b, 50.0);
        assert_relative_eq!(pct.tie, 0.0);

        let first_seed = runner.simulator().requests()[0].seed;
        assert_eq!(first_seed, Some(6_674_089_274_190_705_457));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| l.contains("| Match")).count(), 400);
        assert!(text.ends_with("Tie Percentage: 0.00%\n"));
    }

    #[test]
    fn test_batch_invalid_trials_is_configuration_error() {
        let mut runner = MatchRunner::new(ConstantSimulator::new(1, 0));
        let mut out = Vec::new();
        let batch = BatchOptions {
            num_trials: 0,
            ..Default::default()
        };

        let err = dispatch("batch", &session(), &batch, &mut runner, &mut out).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(runner.matches_started(), 0);
    }
}
