//! Logging setup for the `duel_arena` binary.
//!
//! Logs go to stderr so stdout carries nothing but the match report.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// CLI arguments for controlling tracing output.
#[derive(clap::Args, Debug, Clone)]
pub struct TracingArgs {
    /// Increase logging verbosity (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log output format: compact, pretty, or json
    #[arg(long = "log-format", default_value = "compact", global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl TracingArgs {
    /// The level the flags ask for when `RUST_LOG` is not set.
    pub fn level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbosity {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Install the global subscriber for one `duel_arena` run.
    ///
    /// A set `RUST_LOG` replaces the level from `-v`/`-q` entirely. Every
    /// layer writes to stderr, keeping stdout for match lines and the final
    /// statistics so batch output can be piped or diffed. Call once, before
    /// the engine file is loaded, so configuration errors are logged too.
    pub fn init_tracing(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            let level = self.level();
            EnvFilter::new(format!("{level},duel_arena={level}"))
        };

        match self.log_format {
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact().with_writer(std::io::stderr))
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty().with_writer(std::io::stderr))
                    .init();
            }
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
        }
    }
}
