use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::Vector2;
use regex::Regex;

#[solution_runner(
    name = "Day 13: Claw Contraption",
    parsed = Arcade,
    part_one = Day13,
    part_two = Day13
)]
impl super::AdventOfCode2024<13> {}

/*
Input is the configuration of claw machines, in blocks separated by empty lines. Each block has
three lines: how far button A moves the claw, how far button B moves the claw, and where the prize
is.

```text
Button A: X+94, Y+34
Button B: X+22, Y+67
Prize: X=8400, Y=5400
```

It costs 3 tokens to push button A and 1 token to push button B.
*/

const BUTTON_A_COST: i64 = 3;
const BUTTON_B_COST: i64 = 1;

#[derive(Debug, Clone, Copy)]
struct ClawMachine {
    button_a: Vector2<i64>,
    button_b: Vector2<i64>,
    prize: Vector2<i64>,
}

#[derive(Debug)]
struct Arcade(Vec<ClawMachine>);

#[derive(thiserror::Error, Debug)]
enum ParseArcadeError {
    #[error("expected line formatted like {expected:?}, found: {found:?}")]
    UnexpectedLine {
        expected: &'static str,
        found: String,
    },

    #[error("expected three lines for a claw machine, found {0}")]
    MachineLineCount(usize),
}

impl ParseData for Arcade {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let button_a_re = Regex::new(r"^Button A: X\+(?<x>\d+), Y\+(?<y>\d+)$")?;
        let button_b_re = Regex::new(r"^Button B: X\+(?<x>\d+), Y\+(?<y>\d+)$")?;
        let prize_re = Regex::new(r"^Prize: X=(?<x>\d+), Y=(?<y>\d+)$")?;

        let patterns = [
            (&button_a_re, "Button A: X+_, Y+_"),
            (&button_b_re, "Button B: X+_, Y+_"),
            (&prize_re, "Prize: X=_, Y=_"),
        ];

        let mut scanner = InputScanner::new(input);
        let mut machines = Vec::new();
        while scanner.skip_empty().is_some() {
            let mut line_count = 0;
            let vectors = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
                let &(re, expected) = patterns
                    .get(line_count)
                    .ok_or(ParseArcadeError::MachineLineCount(line_count + 1))?;
                line_count += 1;

                let captures = re
                    .captures(line.trim())
                    .ok_or_else(|| ParseArcadeError::UnexpectedLine {
                        expected,
                        found: line.to_owned(),
                    })?;
                let x: i64 = parse_with_context(&captures["x"])?;
                let y: i64 = parse_with_context(&captures["y"])?;
                Ok(Vector2::new(x, y))
            })?;

            let [button_a, button_b, prize] = vectors[..] else {
                return Err(ParseArcadeError::MachineLineCount(vectors.len()).into());
            };
            machines.push(ClawMachine {
                button_a,
                button_b,
                prize,
            });
        }

        Ok(Self(machines))
    }
}

/// Multiply for a determinant term, panicking on overflow.
fn product(a: i64, b: i64) -> i64 {
    a.checked_mul(b)
        .expect("should not have integer overflow from product")
}

impl ClawMachine {
    /// Find the button presses `(a, b)` that move the claw exactly onto the prize.
    ///
    /// The presses solve a 2×2 linear system, solved exactly with Cramer's rule. Machines whose
    /// buttons move in the same direction have no unique solution and are treated as unwinnable.
    fn presses(&self) -> Option<(i64, i64)> {
        let Self {
            button_a: a,
            button_b: b,
            prize: p,
        } = *self;

        let determinant = product(a.x, b.y) - product(a.y, b.x);
        if determinant == 0 {
            return None;
        }

        let a_numerator = product(p.x, b.y) - product(p.y, b.x);
        let b_numerator = product(a.x, p.y) - product(a.y, p.x);
        if a_numerator % determinant != 0 || b_numerator % determinant != 0 {
            return None;
        }

        let presses = (a_numerator / determinant, b_numerator / determinant);
        (presses.0 >= 0 && presses.1 >= 0).then_some(presses)
    }

    /// The fewest tokens to win the prize, if it can be won within an optional press limit.
    fn tokens_to_win(&self, press_limit: Option<i64>) -> Option<i64> {
        let (a, b) = self.presses()?;
        if press_limit.is_some_and(|limit| a > limit || b > limit) {
            return None;
        }
        Some(product(a, BUTTON_A_COST) + product(b, BUTTON_B_COST))
    }
}

impl Arcade {
    fn total_tokens(&self, press_limit: Option<i64>) -> i64 {
        self.0
            .iter()
            .filter_map(|machine| machine.tokens_to_win(press_limit))
            .checked_sum()
            .expect("should not have integer overflow during summation")
    }
}

/*
For part 1, each button needs no more than 100 presses to win a prize. Find the fewest tokens to
spend to win every prize that can be won.
*/

struct Day13;

impl Solution<PartOne> for Day13 {
    type Input = Arcade;
    type Output = i64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.total_tokens(Some(100)))
    }
}

/*
For part 2, every prize position is actually 10000000000000 higher on both axes. The press limit no
longer applies.
*/

const PRIZE_OFFSET: i64 = 10_000_000_000_000;

impl Solution<PartTwo> for Day13 {
    type Input = Arcade;
    type Output = i64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let offset = Vector2::new(PRIZE_OFFSET, PRIZE_OFFSET);
        let corrected = Arcade(
            input
                .0
                .iter()
                .map(|machine| ClawMachine {
                    prize: machine.prize + offset,
                    ..*machine
                })
                .collect(),
        );
        Ok(corrected.total_tokens(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"Button A: X+94, Y+34
Button B: X+22, Y+67
Prize: X=8400, Y=5400

Button A: X+26, Y+66
Button B: X+67, Y+21
Prize: X=12748, Y=12176

Button A: X+17, Y+86
Button B: X+84, Y+37
Prize: X=7870, Y=6450

Button A: X+69, Y+23
Button B: X+27, Y+71
Prize: X=18641, Y=10279
";

    #[test]
    fn parse_example() -> DynamicResult<()> {
        let parsed = Arcade::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.0.len(), 4);
        assert_eq!(parsed.0[2].button_b, Vector2::new(84, 37));
        assert_eq!(parsed.0[3].prize, Vector2::new(18641, 10279));
        Ok(())
    }

    #[test]
    fn parse_rejects_incomplete_machine() {
        assert!(Arcade::parse("Button A: X+94, Y+34\nButton B: X+22, Y+67\n").is_err());
        assert!(
            Arcade::parse("Button A: X+94, Y+34\nPrize: X=1, Y=1\nButton B: X+22, Y+67\n")
                .is_err()
        );
    }

    #[test]
    fn presses_of_example_machines() -> DynamicResult<()> {
        let parsed = Arcade::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.0[0].presses(), Some((80, 40)));
        assert_eq!(parsed.0[1].presses(), None);
        assert_eq!(parsed.0[2].presses(), Some((38, 86)));
        assert_eq!(parsed.0[3].presses(), None);
        Ok(())
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Arcade::parse(EXAMPLE_INPUT)?;
        let result = <Day13 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 480);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Arcade::parse(EXAMPLE_INPUT)?;
        let result = <Day13 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 875_318_608_908);
        Ok(())
    }
}
