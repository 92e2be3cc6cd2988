//! Console reporting for single and batch runs.
//!
//! Reporters only format what they are given. The percentages in every
//! [`MatchLine`] are taken from the running statistics right after the
//! match was recorded, so a reporter never holds stale numbers.
use std::io::{self, Write};

use crate::arena::comparison::{ComparisonResult, Percentages};
use crate::arena::mirrored::Orientation;
use crate::arena::simulator::ScoreMap;

/// One finished match of a batch run, with the running percentages so far.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchLine {
    /// 0-based mirrored trial index.
    pub trial: usize,
    /// 1-based count of individual matches played so far.
    pub match_number: usize,
    pub orientation: Orientation,
    pub seed: i64,
    pub score_a: i32,
    pub score_b: i32,
    pub percentages: Percentages,
}

/// Receives batch progress as it happens.
pub trait Reporter {
    fn match_completed(&mut self, line: &MatchLine) -> io::Result<()>;

    fn finished(&mut self, result: &ComparisonResult) -> io::Result<()>;
}

pub fn format_match_line(line: &MatchLine) -> String {
    format!(
        "Agent A Win%={:.2}, Agent B Win%={:.2}, Tie%={:.2} | Match{} {}: Seed={}, Agent A Score={}, Agent B Score={}",
        line.percentages.agent_a,
        line.percentages.agent_b,
        line.percentages.tie,
        line.orientation.match_number(),
        line.match_number,
        line.seed,
        line.score_a,
        line.score_b,
    )
}

pub fn format_summary(result: &ComparisonResult) -> String {
    let pct = result.percentages();
    format!(
        "\nFinal Statistics:\n\
         Agent A Win Percentage: {:.2}%\n\
         Agent B Win Percentage: {:.2}%\n\
         Tie Percentage: {:.2}%",
        pct.agent_a, pct.agent_b, pct.tie
    )
}

/// What a single run prints once its match is over.
pub fn format_single_result(scores: &ScoreMap) -> String {
    let mut output = String::from("Game finished!\nScores:");
    for (slot, score) in scores.iter() {
        output.push_str(&format!("\nAgent {slot}: {score}"));
    }
    output
}

/// Writes every line to an [`io::Write`], stdout in the binary.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn match_completed(&mut self, line: &MatchLine) -> io::Result<()> {
        writeln!(self.out, "{}", format_match_line(line))
    }

    fn finished(&mut self, result: &ComparisonResult) -> io::Result<()> {
        writeln!(self.out, "{}", format_summary(result))?;
        self.out.flush()
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn match_completed(&mut self, _line: &MatchLine) -> io::Result<()> {
        Ok(())
    }

    fn finished(&mut self, _result: &ComparisonResult) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps every match line and the summary in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    pub lines: Vec<MatchLine>,
    pub summary: Option<String>,
}

impl Reporter for MemoryReporter {
    fn match_completed(&mut self, line: &MatchLine) -> io::Result<()> {
        self.lines.push(line.clone());
        Ok(())
    }

    fn finished(&mut self, result: &ComparisonResult) -> io::Result<()> {
        self.summary = Some(format_summary(result));
        Ok(())
    }
}
