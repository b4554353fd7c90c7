use std::collections::HashMap;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 1: Historian Hysteria",
    parsed = LocationLists,
    part_one = Day01,
    part_two = Day01
)]
impl super::AdventOfCode2024<1> {}

/*
Input is two lists of location IDs side by side. Each line has a location ID from the left list,
whitespace, then a location ID from the right list.
*/

type LocationId = u32;

/// The two lists of location IDs, in input order.
#[derive(Debug)]
struct LocationLists {
    left: Vec<LocationId>,
    right: Vec<LocationId>,
}

#[derive(thiserror::Error, Debug)]
enum ParseLocationListsError {
    #[error("expected two location IDs in line, found {0}")]
    ColumnCount(usize),
}

impl ParseData for LocationLists {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let pairs: Vec<_> = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let columns: Vec<_> = line.split_whitespace().collect();
            let [left, right] = columns[..] else {
                return Err(ParseLocationListsError::ColumnCount(columns.len()).into());
            };
            Ok((
                parse_with_context::<LocationId>(left)?,
                parse_with_context::<LocationId>(right)?,
            ))
        })
        .collect::<Result<_, _>>()?;

        let (left, right) = pairs.into_iter().unzip();
        Ok(Self { left, right })
    }
}

/*
For part 1, pair up the smallest number in the left list with the smallest in the right list, then
the second smallest of each, and so on. The total distance is the sum of the differences within
each pair.
*/

struct Day01;

impl Solution<PartOne> for Day01 {
    type Input = LocationLists;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut left = input.left.clone();
        let mut right = input.right.clone();
        left.sort_unstable();
        right.sort_unstable();

        let total_distance = left
            .into_iter()
            .zip(right)
            .map(|(a, b)| u64::from(a.abs_diff(b)))
            .checked_sum()
            .expect("should not have integer overflow during summation");
        Ok(total_distance)
    }
}

/*
For part 2, the similarity score adds up each number in the left list multiplied by how many times
it appears in the right list.
*/

impl Solution<PartTwo> for Day01 {
    type Input = LocationLists;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut right_counts: HashMap<LocationId, u64> = HashMap::new();
        for &id in &input.right {
            *right_counts.entry(id).or_default() += 1;
        }

        let similarity = input
            .left
            .iter()
            .map(|id| {
                let count = right_counts.get(id).copied().unwrap_or(0);
                u64::from(*id)
                    .checked_mul(count)
                    .expect("should not have integer overflow from product")
            })
            .checked_sum()
            .expect("should not have integer overflow during summation");
        Ok(similarity)
    }
}
