#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Error, Result};
use aoc_framework::runner::{OutputHandler, RunOptions};
use aoc_framework::{DynamicResult, PartKind};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod disjoint_sets;
mod grid;
mod solutions;

/// Advent of Code 2024 puzzle solver.
#[derive(Parser, Debug)]
struct Cli {
    /// The day's solution to run (e.g. 1, 2, etc). Runs every available day if omitted.
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    day: Option<u8>,

    /// The only part to run (1 or 2). Runs both parts if omitted.
    #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
    part: Option<u8>,

    /// Sets an alternative input file to use over default input.
    #[arg(short, long, value_name = "FILE", requires = "day")]
    input: Option<PathBuf>,

    /// The directory holding default input files and known answers.
    #[arg(long, value_name = "DIR", default_value = "inputs")]
    inputs_dir: PathBuf,

    /// Measure and print the durations of parsing and solving parts.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,
}

/// Read the default input file for a day to a string.
fn get_default_input(inputs_dir: &Path, day: u8) -> Result<String> {
    let path = inputs_dir.join(format!("day{day:02}.txt"));

    fs::read_to_string(&path).with_context(|| {
        format!(
            "default input file missing: {}\n\n\
            please create the file or provide the input file argument",
            path.display()
        )
    })
}

/// Read the given input file to a string.
fn get_input(input_file: &Path) -> Result<String> {
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

/// Read the known answers for a day's default input, from files beside it named by part.
///
/// A missing answer file leaves that part unverified.
fn get_known_answers(inputs_dir: &Path, day: u8) -> Result<HashMap<PartKind, String>> {
    let mut answers = HashMap::new();
    for part in [PartKind::One, PartKind::Two] {
        let path = inputs_dir.join(format!("day{day:02}_{}.txt", part.number()));
        match fs::read_to_string(&path) {
            Ok(answer) => {
                answers.insert(part, answer.trim().to_owned());
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no known answer");
            }
            Err(error) => {
                return Err(Error::new(error)
                    .context(format!("could not read known answer at: {}", path.display())));
            }
        }
    }
    Ok(answers)
}

/// A part's output disagrees with its known answer.
#[derive(thiserror::Error, Debug)]
#[error("{part} output {actual:?} does not match known answer {expected:?}")]
struct AnswerMismatch {
    part: PartKind,
    expected: String,
    actual: String,
}

struct CliOutputHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
    /// Answers to check outputs against, by part.
    known_answers: HashMap<PartKind, String>,
}

impl CliOutputHandler {
    fn new(min_duration: Duration, known_answers: HashMap<PartKind, String>) -> Self {
        Self {
            min_duration,
            known_answers,
        }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Check an output against the known answer for its part.
    ///
    /// # Returns
    ///
    /// A marker to print after the output: empty when verified, or `(?)` when there is no known
    /// answer.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerMismatch`] if the output differs from the known answer.
    fn verify(&self, part: PartKind, actual: &str) -> Result<&'static str, AnswerMismatch> {
        match self.known_answers.get(&part) {
            Some(expected) if expected == actual => Ok(""),
            Some(expected) => Err(AnswerMismatch {
                part,
                expected: expected.clone(),
                actual: actual.to_owned(),
            }),
            None => Ok(" (?)"),
        }
    }

    /// Convert an optional duration into a formatted duration, filtering out if the duration is
    /// shorter than the minimum duration.
    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for CliOutputHandler {
    fn solution_name(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_start(&mut self) {
        // do nothing
    }

    fn parse_end(&mut self, duration_opt: Option<Duration>) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("Input parsed in {formatted_duration}");
        }
    }

    fn part_start(&mut self, part: PartKind) {
        println!("-- {part} --");
    }

    fn part_output(
        &mut self,
        part: PartKind,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    ) -> DynamicResult<()> {
        let actual = output.to_string();
        let verification = self.verify(part, &actual);
        let marker = match &verification {
            Ok(marker) => (*marker).to_owned(),
            Err(mismatch) => format!(" (expected {})", mismatch.expected),
        };

        // the output is printed even when it is wrong
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("{actual}{marker} ({formatted_duration})");
        } else {
            println!("{actual}{marker}");
        }
        verification?;
        Ok(())
    }

    fn part_skipped(&mut self, _part: PartKind) {
        println!("Not implemented");
    }
}

/// Install a subscriber writing diagnostics to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() -> Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .context("invalid log filter")?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}

fn run_day(args: &Cli, day: u8, options: RunOptions) -> Result<()> {
    // known answers only apply to the default input
    let (input_str, known_answers) = match &args.input {
        Some(input_file) => (get_input(input_file)?, HashMap::new()),
        None => (
            get_default_input(&args.inputs_dir, day)?,
            get_known_answers(&args.inputs_dir, day)?,
        ),
    };

    let mut handler = CliOutputHandler::new(
        Duration::from_millis(args.min_timing_ms),
        known_answers,
    );
    solutions::run_day(day, &input_str, &mut handler, options).map_err(|dyn_error| {
        let anyhow_error = Error::from_boxed(dyn_error);
        anyhow_error.context("failed to run solution")
    })
}

fn main() -> Result<()> {
    init_tracing()?;
    let args = Cli::parse();

    let part = args
        .part
        .map(PartKind::try_from)
        .transpose()
        .context("invalid part")?;
    let options = RunOptions {
        part,
        timed: args.timed,
    };

    match args.day {
        Some(day) => run_day(&args, day, options),
        None => {
            for &day in solutions::AVAILABLE_DAYS {
                run_day(&args, day, options)?;
                println!();
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler_with_answer(part: PartKind, answer: &str) -> CliOutputHandler {
        CliOutputHandler::new(Duration::ZERO, HashMap::from([(part, answer.to_owned())]))
    }

    #[test]
    fn verify_marks_unknown_answers() {
        let handler = CliOutputHandler::new(Duration::ZERO, HashMap::new());
        assert_eq!(handler.verify(PartKind::One, "42").ok(), Some(" (?)"));
    }

    #[test]
    fn verify_accepts_known_answer() {
        let handler = handler_with_answer(PartKind::Two, "42");
        assert_eq!(handler.verify(PartKind::Two, "42").ok(), Some(""));
        assert_eq!(handler.verify(PartKind::One, "7").ok(), Some(" (?)"));
    }

    #[test]
    fn mismatched_output_fails_after_reporting() {
        let mut handler = handler_with_answer(PartKind::One, "42");
        let mismatch = handler.verify(PartKind::One, "41").err();
        assert_eq!(
            mismatch.map(|e| (e.expected, e.actual)),
            Some(("42".to_owned(), "41".to_owned()))
        );

        let result = handler.part_output(PartKind::One, &41, Some(Duration::from_millis(3)));
        let error = result.err().map(|e| e.to_string());
        assert_eq!(
            error.as_deref(),
            Some("Part 1 output \"41\" does not match known answer \"42\"")
        );
    }
}
