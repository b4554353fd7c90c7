//! Functions and traits for running solutions.
//!
//! # Quick Start
//!
//! A structure or impl-block can be annotated with the [`#[solution_runner]`][solution_runner]
//! attribute macro with appropriate properties:
//!
//! ```
//! # use aoc_framework::runner::{solution_runner};
//! # use aoc_framework::{DynamicResult, PartOne, Solution};
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = str;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(_input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(0)
//! #    }
//! }
//!
//! #[solution_runner(name = "Day 1", part_one = Day01)]
//! struct Day01Runner;
//! ```
//!
//! Running is driven by [`RunOptions`], which selects the parts to run and whether to time them.
//! A part whose solution returns [`NotImplemented`] is reported through
//! [`OutputHandler::part_skipped`] rather than failing the run.

use std::fmt::Display;
use std::time::Duration;

use crate::{
    DynamicResult, NotImplemented, ParseData, Part, PartKind, PartOne, PartTwo, Solution,
};

// re-export procedural macro
pub use aoc_framework_macros::solution_runner;

/// A trait for an output events handler.
///
/// When a solution runs, the steps of running the solution leads to events to output through a
/// handler as feedback.
pub trait OutputHandler {
    /// Called to output the name of the solution, at the start of running the solution.
    fn solution_name(&mut self, name: &str);

    /// Called when the solution starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when a solution part starts, with a [`PartKind`] to identify the part.
    fn part_start(&mut self, part: PartKind);

    /// Called when a part finishes to output the result, with a [`PartKind`] to identify the part.
    ///
    /// The duration taken to run the part is optionally passed.
    ///
    /// # Errors
    ///
    /// A handler may reject an output, e.g. when it disagrees with a known answer. The error is
    /// propagated out of the run.
    fn part_output(
        &mut self,
        part: PartKind,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    ) -> DynamicResult<()>;

    /// Called instead of [`OutputHandler::part_output`] when a part has no solution.
    fn part_skipped(&mut self, part: PartKind);
}

/// Options for running a solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// The only part to run. Both parts run when `None`.
    pub part: Option<PartKind>,
    /// Measure the durations of parsing and solving parts.
    pub timed: bool,
}

impl RunOptions {
    /// Check if a part is selected to run.
    #[must_use]
    pub fn includes(self, part: PartKind) -> bool {
        self.part.is_none_or(|selected| selected == part)
    }
}

/// Measure the duration of an expression.
///
/// Returns a tuple of the expression's result and the elapsed [`Duration`].
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// Optionally measure the duration of an expression.
///
/// Returns a tuple of the expression's result and the elapsed [`Duration`] if `$timed` is `true`,
/// or `None` otherwise.
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let (result, duration) = measure_duration!($expr);
            (result, Some(duration))
        } else {
            ($expr, None)
        }
    }};
}

/// Report a part that has no solution to run.
fn skip_part(part: PartKind, handler: &mut dyn OutputHandler) {
    tracing::debug!(%part, "skipping part without a solution");
    handler.part_start(part);
    handler.part_skipped(part);
}

/// Run a solution part, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution or the handler is propagated, except
/// [`NotImplemented`] which is reported as a skipped part.
fn run_part<S, P>(
    input: &S::Input,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    let part = P::kind();
    handler.part_start(part);
    let (result, duration_opt) = measure_with_optional_duration!(S::solve(input), timed);
    match result {
        Ok(output) => handler.part_output(part, &output, duration_opt),
        Err(error) if NotImplemented::is_signal(&error) => {
            tracing::debug!(%part, "solution reported part as not implemented");
            handler.part_skipped(part);
            Ok(())
        }
        Err(error) => Err(error),
    }
}

/// Run a solution's parse step, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<D> {
    handler.parse_start();
    let (result, duration_opt) = measure_with_optional_duration!(D::parse(input), timed);
    let parsed = result?;
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Run a solution that only implements part one and accepts string input.
///
/// Selecting part two reports it as skipped.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
pub fn solve_half_solution<S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    options: RunOptions,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
{
    handler.solution_name(name);
    if options.includes(PartKind::One) {
        run_part::<S1, PartOne>(input, handler, options.timed)?;
    }
    if options.includes(PartKind::Two) {
        skip_part(PartKind::Two, handler);
    }
    Ok(())
}

/// Run a solution that implements both parts and accepts string input.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution parts is propagated.
pub fn solve_full_solution<S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    options: RunOptions,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
    S2: Solution<PartTwo, Input = str>,
{
    handler.solution_name(name);
    if options.includes(PartKind::One) {
        run_part::<S1, PartOne>(input, handler, options.timed)?;
    }
    if options.includes(PartKind::Two) {
        run_part::<S2, PartTwo>(input, handler, options.timed)?;
    }
    Ok(())
}

/// Run a solution that implements part one and has a parse data step for input.
///
/// Selecting part two reports it as skipped, without parsing.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution is propagated.
pub fn solve_parsed_half_solution<D, S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    options: RunOptions,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
{
    handler.solution_name(name);
    if options.includes(PartKind::One) {
        let parsed = run_parse::<D>(input, handler, options.timed)?;
        run_part::<S1, PartOne>(&parsed, handler, options.timed)?;
    }
    if options.includes(PartKind::Two) {
        skip_part(PartKind::Two, handler);
    }
    Ok(())
}

/// Run a solution that implements both parts and has a parse data step for input.
///
/// Input is parsed once and shared by the selected parts.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution parts is propagated.
pub fn solve_parsed_full_solution<D, S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    options: RunOptions,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler, options.timed)?;
    if options.includes(PartKind::One) {
        run_part::<S1, PartOne>(&parsed, handler, options.timed)?;
    }
    if options.includes(PartKind::Two) {
        run_part::<S2, PartTwo>(&parsed, handler, options.timed)?;
    }
    Ok(())
}

/// A trait for solutions that can be run.
///
/// The trait can be implemented with the [`solution_runner`] attribute macro.
pub trait SolutionRunner {
    /// Run the solution.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(
        input: &str,
        handler: &mut dyn OutputHandler,
        options: RunOptions,
    ) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A handler recording events as strings.
    #[derive(Default)]
    struct RecordingHandler {
        events: Vec<String>,
    }

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.events.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.events.push("parse".to_owned());
        }

        fn parse_end(&mut self, duration_opt: Option<Duration>) {
            self.events
                .push(format!("parsed timed={}", duration_opt.is_some()));
        }

        fn part_start(&mut self, part: PartKind) {
            self.events.push(format!("start {part}"));
        }

        fn part_output(
            &mut self,
            part: PartKind,
            output: &dyn Display,
            _duration_opt: Option<Duration>,
        ) -> DynamicResult<()> {
            self.events.push(format!("output {part}: {output}"));
            Ok(())
        }

        fn part_skipped(&mut self, part: PartKind) {
            self.events.push(format!("skipped {part}"));
        }
    }

    struct Words(Vec<String>);

    impl ParseData for Words {
        fn parse(input: &str) -> DynamicResult<Self> {
            Ok(Self(input.split_whitespace().map(String::from).collect()))
        }
    }

    struct CountWords;

    impl Solution<PartOne> for CountWords {
        type Input = Words;
        type Output = usize;

        fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
            Ok(input.0.len())
        }
    }

    struct Unsolved;

    impl Solution<PartTwo> for Unsolved {
        type Input = Words;
        type Output = usize;

        fn solve(_input: &Self::Input) -> DynamicResult<Self::Output> {
            Err(NotImplemented.into())
        }
    }

    struct Failing;

    impl Solution<PartTwo> for Failing {
        type Input = Words;
        type Output = usize;

        fn solve(_input: &Self::Input) -> DynamicResult<Self::Output> {
            Err("solution failed".into())
        }
    }

    struct CountLines;

    impl Solution<PartOne> for CountLines {
        type Input = str;
        type Output = usize;

        fn solve(input: &str) -> DynamicResult<usize> {
            Ok(input.lines().count())
        }
    }

    #[test]
    fn not_implemented_part_is_skipped() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_parsed_full_solution::<Words, CountWords, Unsolved>(
            "Test",
            "a b c",
            &mut handler,
            RunOptions::default(),
        )?;
        assert_eq!(
            handler.events,
            [
                "name Test",
                "parse",
                "parsed timed=false",
                "start Part 1",
                "output Part 1: 3",
                "start Part 2",
                "skipped Part 2",
            ]
        );
        Ok(())
    }

    #[test]
    fn other_errors_are_propagated() {
        let mut handler = RecordingHandler::default();
        let result = solve_parsed_full_solution::<Words, CountWords, Failing>(
            "Test",
            "a b c",
            &mut handler,
            RunOptions::default(),
        );
        assert!(result.is_err());
        assert!(!handler.events.iter().any(|event| event.starts_with("skipped")));
    }

    #[test]
    fn selected_part_runs_alone() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_parsed_full_solution::<Words, CountWords, Failing>(
            "Test",
            "a b",
            &mut handler,
            RunOptions {
                part: Some(PartKind::One),
                timed: true,
            },
        )?;
        assert_eq!(
            handler.events,
            [
                "name Test",
                "parse",
                "parsed timed=true",
                "start Part 1",
                "output Part 1: 2",
            ]
        );
        Ok(())
    }

    #[test]
    fn half_solution_skips_part_two() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_half_solution::<CountLines>(
            "Lines",
            "x\ny\n",
            &mut handler,
            RunOptions {
                part: Some(PartKind::Two),
                timed: false,
            },
        )?;
        assert_eq!(
            handler.events,
            ["name Lines", "start Part 2", "skipped Part 2"]
        );
        Ok(())
    }

    #[test]
    fn run_options_include_selected_parts() {
        let both = RunOptions::default();
        assert!(both.includes(PartKind::One));
        assert!(both.includes(PartKind::Two));

        let only_two = RunOptions {
            part: Some(PartKind::Two),
            timed: false,
        };
        assert!(!only_two.includes(PartKind::One));
        assert!(only_two.includes(PartKind::Two));
    }
}
