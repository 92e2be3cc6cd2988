use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{MatchRequest, ScoreMap, Simulator};
use crate::arena::errors::{ConfigurationError, SimulationFailure};
use crate::arena::session::HostedSession;

/// How to launch the external referee.
///
/// Every argument may contain the placeholders `{first}`, `{second}`,
/// `{level}`, `{seed}` and `{port}`. `seed_args` are only appended when a
/// seed is fixed, so the engine can pick its own otherwise.
///
/// ```json
/// {
///   "program": "java",
///   "args": ["-jar", "referee.jar", "--p1", "{first}", "--p2", "{second}", "--league", "{level}"],
///   "seed_args": ["--seed", "{seed}"],
///   "host_args": ["-jar", "referee.jar", "--serve", "{port}", "--p1", "{first}", "--p2", "{second}", "--league", "{level}"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub seed_args: Vec<String>,
    #[serde(default)]
    pub host_args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_json(json: &str, path: &Path) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|source| ConfigurationError::ParseEngineConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|source| ConfigurationError::ReadEngineConfig {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&json, path)
    }
}

#[derive(Deserialize)]
struct EngineOutput {
    scores: ScoreMap,
}

/// A [`Simulator`] that runs a referee program once per match.
///
/// The referee is expected to print its result as a JSON line
/// `{"scores": {"0": <score>, "1": <score>}}` on stdout. Anything else it
/// prints is ignored, the last JSON object line wins.
#[derive(Debug, Clone)]
pub struct CommandSimulator {
    config: EngineConfig,
}

impl CommandSimulator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn command(&self, template: &[String], vars: &[(&str, String)], seed: Option<i64>) -> Command {
        let mut args: Vec<String> = template.iter().map(|arg| render(arg, vars)).collect();
        if seed.is_some() {
            args.extend(self.config.seed_args.iter().map(|arg| render(arg, vars)));
        }

        let mut command = Command::new(&self.config.program);
        command.args(&args);
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }
        trace!(program = %self.config.program, ?args, "Built engine command");
        command
    }

    fn spawn_failure(&self, source: std::io::Error) -> SimulationFailure {
        SimulationFailure::Spawn {
            program: self.config.program.clone(),
            source,
        }
    }
}

impl Simulator for CommandSimulator {
    fn simulate(&mut self, request: &MatchRequest) -> Result<ScoreMap, SimulationFailure> {
        let vars = [
            ("first", request.first.to_string()),
            ("second", request.second.to_string()),
            ("level", request.league_level.to_string()),
            ("seed", request.seed.map(|s| s.to_string()).unwrap_or_default()),
        ];

        let output = self
            .command(&self.config.args, &vars, request.seed)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_failure(e))?;

        if !output.status.success() {
            return Err(SimulationFailure::EngineExited {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_engine_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn host(&mut self, session: &HostedSession) -> Result<(), SimulationFailure> {
        let vars = [
            ("first", session.agent_a.to_string()),
            ("second", session.agent_b.to_string()),
            ("level", session.league_level.to_string()),
            ("seed", session.seed.map(|s| s.to_string()).unwrap_or_default()),
            ("port", session.port.to_string()),
        ];

        debug!(port = session.port, "Handing session to engine host");
        let status = self
            .command(&self.config.host_args, &vars, session.seed)
            .status()
            .map_err(|e| self.spawn_failure(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(SimulationFailure::EngineExited {
                status,
                stderr: String::new(),
            })
        }
    }
}

/// Substitutes `{name}` tokens in one left-to-right pass. Inserted values
/// are never scanned again, so an agent path may itself contain braces.
fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let token = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| (close, value))
        });

        match token {
            Some((close, value)) => {
                output.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

fn parse_engine_output(stdout: &str) -> Result<ScoreMap, SimulationFailure> {
    let line = stdout
        .lines()
        .map(str::trim)
        .rev()
        .find(|line| line.starts_with('{'))
        .ok_or_else(|| {
            SimulationFailure::MalformedOutput("no JSON result line in engine output".to_string())
        })?;

    serde_json::from_str::<EngineOutput>(line)
        .map(|out| out.scores)
        .map_err(|e| SimulationFailure::MalformedOutput(format!("{e}: {line}")))
}
