//! Solutions implemented for Advent of Code 2024.
//!
//! This module provides [`run_day`] to dynamically run a solution by its day, and
//! [`AVAILABLE_DAYS`] to list the days that can be run.
//!
//! Steps to make a solution available to run:
//! 1. Make a submodule to hold the solution implementation.
//! 2. Have the submodule implement [`AdventOfCode2024<DAY>`] for its day as a [`SolutionRunner`].
//! 3. Import the submodule below `IMPORT SUBMODULES HERE`
//! 4. Add a match case to run [`AdventOfCode2024<DAY>`] for a day, below `MATCH SOLUTIONS HERE`,
//!    and add the day to [`AVAILABLE_DAYS`]:
//!
//! ```ignore
//! // matching for day 1
//! 1 => AdventOfCode2024::<1>::run(input, handler, options),
//! ```

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, RunOptions, SolutionRunner};
use thiserror::Error;

// --- IMPORT SUBMODULES HERE ---
mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;

/// The days with a solution available, in ascending order.
pub const AVAILABLE_DAYS: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];

/// A structure collecting solutions by day.
///
/// In a submodule, implement this as a [`SolutionRunner`] for the day.
///
/// Use [`#[solution_runner]`][aoc_framework::runner::solution_runner] for convenience:
///
/// ```ignore
/// // in a submodule "day01.rs"
/// use aoc_framework::runner::solution_runner;
/// use aoc_framework::{PartOne, Solution};
///
/// struct Day01;
/// impl Solution<PartOne> for Day01 {
///     /* ... */
/// }
///
/// #[solution_runner(name = "Day 1", part_one = Day01)]
/// impl super::AdventOfCode2024<1> {}
/// ```
struct AdventOfCode2024<const DAY: u8>;

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// Run a solution based on the day.
///
/// # Errors
///
/// If the solution for the given day is not available, a [`DayNotAvailable`] error is returned.
///
/// Any dynamically dispatched error from running the solution is propagated.
pub fn run_day(
    day: u8,
    input: &str,
    handler: &mut dyn OutputHandler,
    options: RunOptions,
) -> DynamicResult<()> {
    tracing::debug!(day, ?options, "running solution");
    match day {
        // --- MATCH SOLUTIONS HERE ---
        1 => AdventOfCode2024::<1>::run(input, handler, options),
        2 => AdventOfCode2024::<2>::run(input, handler, options),
        3 => AdventOfCode2024::<3>::run(input, handler, options),
        4 => AdventOfCode2024::<4>::run(input, handler, options),
        5 => AdventOfCode2024::<5>::run(input, handler, options),
        6 => AdventOfCode2024::<6>::run(input, handler, options),
        7 => AdventOfCode2024::<7>::run(input, handler, options),
        8 => AdventOfCode2024::<8>::run(input, handler, options),
        9 => AdventOfCode2024::<9>::run(input, handler, options),
        10 => AdventOfCode2024::<10>::run(input, handler, options),
        11 => AdventOfCode2024::<11>::run(input, handler, options),
        12 => AdventOfCode2024::<12>::run(input, handler, options),
        13 => AdventOfCode2024::<13>::run(input, handler, options),
        _ => Err(DayNotAvailable(day).into()),
    }
}
