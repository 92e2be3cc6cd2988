//! Two-agent match harness.
//!
//! ```text
//! duel_arena start ./bot_a ./bot_b 42     # hosted session on port 8888
//! duel_arena run   ./bot_a ./bot_b        # one match, engine picks the seed
//! duel_arena stat  ./bot_a ./bot_b        # 200 mirrored trials
//! ```
mod tracing_args;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use duel_arena::arena::comparison::DEFAULT_NUM_TRIALS;
use duel_arena::arena::session::parse_seed;
use duel_arena::arena::simulator::{CommandSimulator, EngineConfig};
use duel_arena::arena::{
    ArenaError, BatchOptions, DEFAULT_LEAGUE_LEVEL, DEFAULT_MASTER_SEED, DEFAULT_PORT,
    MatchRunner, Mode, RunOutput, SessionConfig, dispatch,
};
use tracing::error;

use tracing_args::TracingArgs;

const USAGE: &str = "Usage: duel_arena <start|run|stat> <AGENT_A> <AGENT_B> [SEED]\n  \
     start  host an interactive session\n  \
     run    play a single match\n  \
     stat   play mirrored trials and report win percentages";

#[derive(Parser, Debug)]
#[command(
    name = "duel_arena",
    about = "Play two agents against each other through an external game engine",
    long_about = "Runs a hosted session, a single match, or a batch of mirrored trials\n\
                  where every seed is played once with each agent moving first."
)]
struct Args {
    /// start | run | stat (aliases: host, hosted, single, batch)
    mode: String,

    /// Command or path of the first agent
    agent_a: String,

    /// Command or path of the second agent
    agent_b: String,

    /// Fixed seed for hosted and single runs; ignored by batch runs
    seed: Option<String>,

    /// Number of mirrored trials in a batch run
    #[arg(short = 'n', long = "trials", default_value_t = DEFAULT_NUM_TRIALS)]
    trials: usize,

    /// Master seed of the batch seed stream
    #[arg(long = "master-seed", default_value_t = DEFAULT_MASTER_SEED, allow_hyphen_values = true)]
    master_seed: i64,

    /// League level passed to the engine
    #[arg(long = "league", default_value_t = DEFAULT_LEAGUE_LEVEL)]
    league: u32,

    /// Port a hosted session listens on
    #[arg(long = "port", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// JSON file describing how to launch the engine
    #[arg(long = "engine", default_value = "engine.json")]
    engine: PathBuf,

    /// Optional directory to save batch results
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    tracing: TracingArgs,
}

fn run(args: Args) -> Result<(), ArenaError> {
    // Refuse a bad selector before touching the engine file.
    args.mode.parse::<Mode>()?;

    let seed = args.seed.as_deref().map(parse_seed).transpose()?;
    let session = SessionConfig::new(args.agent_a, args.agent_b)
        .with_seed(seed)
        .with_league_level(args.league)
        .with_port(args.port);
    let batch = BatchOptions {
        num_trials: args.trials,
        master_seed: args.master_seed,
        output_dir: args.output_dir,
    };

    let engine = EngineConfig::from_file(&args.engine)?;
    let mut runner = MatchRunner::new(CommandSimulator::new(engine));

    let output = dispatch(&args.mode, &session, &batch, &mut runner, &mut io::stdout().lock())?;

    if let (RunOutput::Batch(_), Some(dir)) = (&output, &batch.output_dir) {
        println!("\nResults saved to:");
        println!("  - {}", dir.join("results.json").display());
        println!("  - {}", dir.join("results.md").display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.tracing.init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Run failed");
            eprintln!("{err}");
            if err.is_configuration() {
                eprintln!("{USAGE}");
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
