use std::collections::HashMap;

use aoc_framework::parsing::parse_with_context;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 11: Plutonian Pebbles",
    parsed = Stones,
    part_one = Day11,
    part_two = Day11
)]
impl super::AdventOfCode2024<11> {}

/*
Input is a single line of numbers engraved on stones, separated by spaces.

Every time you blink, each stone changes by the first applicable rule:

- A stone engraved with 0 becomes a stone engraved with 1.
- A stone with an even number of digits splits into two stones, the left half of the digits and the
  right half of the digits. Leading zeroes are dropped.
- Otherwise the stone's number is multiplied by 2024.

Stones keep their order, but order doesn't affect how they change.
*/

type Stone = u64;

#[derive(Debug)]
struct Stones(Vec<Stone>);

impl ParseData for Stones {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let stones = input
            .split_whitespace()
            .map(parse_with_context)
            .collect::<Result<_, _>>()?;
        Ok(Self(stones))
    }
}

/// The stones a single stone becomes after one blink.
#[derive(Debug, PartialEq, Eq)]
enum Blinked {
    One(Stone),
    Two(Stone, Stone),
}

/// Split a number with an even count of digits into its halves of digits.
fn split_digits(stone: Stone) -> Option<(Stone, Stone)> {
    let digits = stone.checked_ilog10().map_or(1, |log| log + 1);
    if digits % 2 != 0 {
        return None;
    }
    let half = 10_u64.pow(digits / 2);
    Some((stone / half, stone % half))
}

fn blink(stone: Stone) -> Blinked {
    if stone == 0 {
        return Blinked::One(1);
    }
    match split_digits(stone) {
        Some((left, right)) => Blinked::Two(left, right),
        None => Blinked::One(
            stone
                .checked_mul(2024)
                .expect("stone number should not overflow"),
        ),
    }
}

/*
For part 1, count the stones after blinking 25 times.
*/

/// Blink every stone once, keeping their order.
fn blink_all(stones: &[Stone]) -> Vec<Stone> {
    let mut blinked = Vec::with_capacity(stones.len() * 2);
    for &stone in stones {
        match blink(stone) {
            Blinked::One(stone) => blinked.push(stone),
            Blinked::Two(left, right) => blinked.extend([left, right]),
        }
    }
    blinked
}

struct Day11;

impl Solution<PartOne> for Day11 {
    type Input = Stones;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut stones = input.0.clone();
        for _ in 0..25 {
            stones = blink_all(&stones);
        }
        Ok(stones.len())
    }
}

/*
For part 2, count the stones after blinking 75 times.

The line grows too long to simulate, but each stone evolves independently, and stone numbers repeat
often. So the counts are memoized by stone and blinks remaining.
*/

#[derive(Debug, Default)]
struct StoneCounter {
    memo: HashMap<(Stone, u32), u64>,
}

impl StoneCounter {
    /// Count the stones one stone becomes after some blinks.
    fn count(&mut self, stone: Stone, blinks: u32) -> u64 {
        if blinks == 0 {
            return 1;
        }
        if let Some(&count) = self.memo.get(&(stone, blinks)) {
            return count;
        }

        let count = match blink(stone) {
            Blinked::One(next) => self.count(next, blinks - 1),
            Blinked::Two(left, right) => self
                .count(left, blinks - 1)
                .checked_add(self.count(right, blinks - 1))
                .expect("stone count should not overflow"),
        };
        self.memo.insert((stone, blinks), count);
        count
    }
}

impl Solution<PartTwo> for Day11 {
    type Input = Stones;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut counter = StoneCounter::default();
        let total = input
            .0
            .iter()
            .map(|&stone| counter.count(stone, 75))
            .checked_sum()
            .expect("should not have integer overflow during summation");
        tracing::debug!(memoized = counter.memo.len(), "counted stones");
        Ok(total)
    }
}
