use aoc_framework::parsing::parse_with_context;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::{Captures, Regex};

#[solution_runner(name = "Day 3: Mull It Over", part_one = Day03, part_two = Day03)]
impl super::AdventOfCode2024<3> {}

/*
Input is corrupted program memory. Among the noise are instructions like `mul(X,Y)`, where `X` and
`Y` are each 1-3 digit numbers. Any other form, like `mul(4*` or `mul ( 2 , 4 )`, does nothing.
*/

type Operand = u32;

/// Multiply the operands captured by a `mul` instruction.
fn multiply(captures: &Captures) -> DynamicResult<u64> {
    let left: Operand = parse_with_context(&captures["left"])?;
    let right: Operand = parse_with_context(&captures["right"])?;
    Ok(u64::from(left) * u64::from(right))
}

/*
For part 1, add up the results of every valid `mul` instruction.
*/

struct Day03;

impl Solution<PartOne> for Day03 {
    type Input = str;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let re = Regex::new(r"mul\((?<left>\d{1,3}),(?<right>\d{1,3})\)")?;
        let products = re
            .captures_iter(input)
            .map(|captures| multiply(&captures))
            .collect::<DynamicResult<Vec<_>>>()?;

        let sum = products
            .into_iter()
            .checked_sum()
            .expect("should not have integer overflow during summation");
        Ok(sum)
    }
}

/*
For part 2, conditional instructions also appear. `do()` enables future `mul` instructions and
`don't()` disables them. Only the most recent conditional applies, and `mul` instructions start
enabled. Add up the results of only the enabled `mul` instructions.
*/

impl Solution<PartTwo> for Day03 {
    type Input = str;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let re = Regex::new(
            r"(?<enable>do\(\))|(?<disable>don't\(\))|mul\((?<left>\d{1,3}),(?<right>\d{1,3})\)",
        )?;

        let mut enabled = true;
        let mut sum: u64 = 0;
        for captures in re.captures_iter(input) {
            if captures.name("enable").is_some() {
                enabled = true;
            } else if captures.name("disable").is_some() {
                enabled = false;
            } else if enabled {
                sum = sum
                    .checked_add(multiply(&captures)?)
                    .expect("should not have integer overflow during summation");
            }
        }
        Ok(sum)
    }
}
