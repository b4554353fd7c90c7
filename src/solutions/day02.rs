use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 2: Red-Nosed Reports",
    parsed = Reports,
    part_one = Day02,
    part_two = Day02
)]
impl super::AdventOfCode2024<2> {}

/*
Input is reactor data. Each line is a report of levels, separated by spaces.
*/

type Level = i32;

#[derive(Debug)]
struct Reports(Vec<Vec<Level>>);

impl ParseData for Reports {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let reports = parse_input_lines(input, |_, line| {
            line.split_whitespace()
                .map(parse_with_context::<Level>)
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(reports))
    }
}

/*
For part 1, a report is safe if its levels are all increasing or all decreasing, and any two
adjacent levels differ by at least one and at most three. Count the safe reports.
*/

/// Check a sequence of levels changes gradually in one direction.
fn is_safe(levels: impl Iterator<Item = Level> + Clone) -> bool {
    let differences = levels.clone().zip(levels.skip(1)).map(|(a, b)| b - a);

    let mut direction = None;
    for difference in differences {
        if !(1..=3).contains(&difference.abs()) {
            return false;
        }
        let sign = difference.signum();
        match direction {
            None => direction = Some(sign),
            Some(expected) if expected != sign => return false,
            Some(_) => {}
        }
    }
    true
}

struct Day02;

impl Solution<PartOne> for Day02 {
    type Input = Reports;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let safe_count = input
            .0
            .iter()
            .filter(|levels| is_safe(levels.iter().copied()))
            .count();
        Ok(safe_count)
    }
}

/*
For part 2, the reactor tolerates a single bad level: a report counts as safe if removing any one
level would make it safe.
*/

fn is_safe_with_dampener(levels: &[Level]) -> bool {
    is_safe(levels.iter().copied())
        || (0..levels.len()).any(|removed| {
            let remaining = levels
                .iter()
                .enumerate()
                .filter(move |&(index, _)| index != removed)
                .map(|(_, &level)| level);
            is_safe(remaining)
        })
}

impl Solution<PartTwo> for Day02 {
    type Input = Reports;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let safe_count = input
            .0
            .iter()
            .filter(|levels| is_safe_with_dampener(levels))
            .count();
        Ok(safe_count)
    }
}
