use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 7: Bridge Repair",
    parsed = Equations,
    part_one = Day07,
    part_two = Day07
)]
impl super::AdventOfCode2024<7> {}

/*
Input is calibration equations with their operators missing. Each line has a test value, a colon,
then space-separated numbers.

Operators are always evaluated left-to-right, not by precedence, and numbers can't be rearranged.
*/

#[derive(Debug)]
struct Equation {
    test_value: u64,
    numbers: Vec<u64>,
}

#[derive(Debug)]
struct Equations(Vec<Equation>);

#[derive(thiserror::Error, Debug)]
enum ParseEquationError {
    #[error("expected a colon after the test value")]
    MissingColon,

    #[error("equation has no numbers")]
    MissingNumbers,
}

impl ParseData for Equations {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let equations = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (test_value, numbers) = line
                .split_once(':')
                .ok_or(ParseEquationError::MissingColon)?;

            let numbers = numbers
                .split_whitespace()
                .map(parse_with_context)
                .collect::<Result<Vec<_>, _>>()?;
            if numbers.is_empty() {
                return Err(ParseEquationError::MissingNumbers.into());
            }

            Ok(Equation {
                test_value: parse_with_context(test_value.trim())?,
                numbers,
            })
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(equations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Multiply,
    /// Joins the digits of the left and right numbers, e.g. `12 || 345` is `12345`.
    Concatenate,
}

/// The power of ten just above a number's digits, e.g. 100 for 42.
fn digit_shift(value: u64) -> u64 {
    let mut shift = 10;
    while shift <= value {
        shift = shift
            .checked_mul(10)
            .expect("digit shift should not overflow");
    }
    shift
}

impl Operator {
    /// Undo this operator having produced `result` with `right` as its right operand.
    ///
    /// Returns the left operand that must have been used, if any could produce `result`.
    fn invert(self, result: u64, right: u64) -> Option<u64> {
        match self {
            Self::Add => result.checked_sub(right),
            Self::Multiply => match right {
                0 => None,
                _ => (result % right == 0).then(|| result / right),
            },
            Self::Concatenate => {
                let shift = digit_shift(right);
                (result % shift == right).then(|| result / shift)
            }
        }
    }
}

impl Equation {
    /// Check some choice of operators between the numbers produces the test value.
    ///
    /// Works backwards from the test value, undoing the rightmost number with each operator.
    fn is_possible(&self, operators: &[Operator]) -> bool {
        fn solve_from(target: u64, numbers: &[u64], operators: &[Operator]) -> bool {
            match numbers {
                [] => false,
                [first] => *first == target,
                [rest @ .., last] => {
                    // anything times zero is zero
                    if *last == 0 && target == 0 && operators.contains(&Operator::Multiply) {
                        return true;
                    }
                    operators.iter().any(|operator| {
                        operator
                            .invert(target, *last)
                            .is_some_and(|left| solve_from(left, rest, operators))
                    })
                }
            }
        }

        solve_from(self.test_value, &self.numbers, operators)
    }
}

impl Equations {
    fn total_calibration(&self, operators: &[Operator]) -> u64 {
        self.0
            .iter()
            .filter(|equation| equation.is_possible(operators))
            .map(|equation| equation.test_value)
            .checked_sum()
            .expect("should not have integer overflow during summation")
    }
}

/*
For part 1, the operators are add (`+`) and multiply (`*`). Sum the test values of equations that
could be true.
*/

struct Day07;

impl Solution<PartOne> for Day07 {
    type Input = Equations;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.total_calibration(&[Operator::Add, Operator::Multiply]))
    }
}

/*
For part 2, a third operator concatenates (`||`) the digits of its left and right numbers.
*/

impl Solution<PartTwo> for Day07 {
    type Input = Equations;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.total_calibration(&[
            Operator::Add,
            Operator::Multiply,
            Operator::Concatenate,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"190: 10 19
3267: 81 40 27
83: 17 5
156: 15 6
7290: 6 8 6 15
161011: 16 10 13
192: 17 8 14
21037: 9 7 18 13
292: 11 6 16 20
";

    #[test]
    fn concatenate_inverts_digits() {
        assert_eq!(Operator::Concatenate.invert(12345, 345), Some(12));
        assert_eq!(Operator::Concatenate.invert(156, 6), Some(15));
        assert_eq!(Operator::Concatenate.invert(156, 5), None);
        assert_eq!(Operator::Concatenate.invert(100, 0), Some(10));
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Equations::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 3749);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Equations::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 11387);
        Ok(())
    }
}
