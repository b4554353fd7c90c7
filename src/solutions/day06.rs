use std::collections::HashSet;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::{Point2, Vector2};

use crate::grid::Grid;

#[solution_runner(
    name = "Day 6: Guard Gallivant",
    parsed = Lab,
    part_one = Day06,
    part_two = Day06
)]
impl super::AdventOfCode2024<6> {}

/*
Input is a map of a lab as a character grid. `.` is open floor, `#` is an obstruction, and `^` is
the guard facing up.

The guard patrols by a strict protocol: if something is directly in front, turn right 90 degrees;
otherwise take a step forward.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Open,
    Obstruction,
}

#[derive(Debug)]
struct Lab {
    tiles: Grid<Tile>,
    /// The guard's starting position; the guard starts facing up.
    start: Point2<i32>,
}

#[derive(thiserror::Error, Debug)]
enum ParseLabError {
    #[error("invalid character in lab map: {0:?}")]
    InvalidChar(char),

    #[error("lab map has more than one guard")]
    MultipleGuards,

    #[error("lab map has no guard")]
    MissingGuard,
}

impl ParseData for Lab {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut start = None;
        let tiles = Grid::parse_with(input, |row, col, character| match character {
            '.' => Ok(Tile::Open),
            '#' => Ok(Tile::Obstruction),
            '^' => {
                if start.is_some() {
                    return Err(ParseLabError::MultipleGuards);
                }
                start = Some((row, col));
                Ok(Tile::Open)
            }
            _ => Err(ParseLabError::InvalidChar(character)),
        })?;

        let (row, col) = start.ok_or(ParseLabError::MissingGuard)?;
        let start = Point2::new(i32::try_from(col)?, i32::try_from(row)?);
        Ok(Self { tiles, start })
    }
}

/// How a patrol ends.
#[derive(Debug, PartialEq, Eq)]
enum Patrol {
    /// The guard walked off the map, after visiting these positions.
    Exits(HashSet<Point2<i32>>),
    /// The guard returned to a position and facing seen before, so walks forever.
    Loops,
}

fn turn_right(direction: Vector2<i32>) -> Vector2<i32> {
    Vector2::new(-direction.y, direction.x)
}

impl Lab {
    fn is_obstructed(&self, position: Point2<i32>, extra: Option<Point2<i32>>) -> bool {
        extra == Some(position) || self.tiles.get_point(position) == Some(&Tile::Obstruction)
    }

    /// Follow the guard's patrol, optionally with one extra obstruction placed in the lab.
    fn patrol(&self, extra_obstruction: Option<Point2<i32>>) -> Patrol {
        let mut position = self.start;
        let mut direction = Vector2::new(0, -1);
        let mut states = HashSet::new();

        while self.tiles.contains_point(position) {
            if !states.insert((position, direction)) {
                return Patrol::Loops;
            }

            let ahead = position + direction;
            if self.is_obstructed(ahead, extra_obstruction) {
                direction = turn_right(direction);
            } else {
                position = ahead;
            }
        }

        Patrol::Exits(states.into_iter().map(|(position, _)| position).collect())
    }
}

/*
For part 1, count the distinct positions the guard visits before leaving the mapped area.
*/

/// The guard is stuck in a loop without any added obstruction.
#[derive(thiserror::Error, Debug)]
#[error("guard never leaves the lab")]
struct EndlessPatrol;

struct Day06;

impl Solution<PartOne> for Day06 {
    type Input = Lab;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        match input.patrol(None) {
            Patrol::Exits(visited) => Ok(visited.len()),
            Patrol::Loops => Err(EndlessPatrol.into()),
        }
    }
}

/*
For part 2, a single new obstruction can be placed to trap the guard in a loop. It can't be placed
at the guard's starting position. Count the positions where a new obstruction causes a loop.
*/

impl Solution<PartTwo> for Day06 {
    type Input = Lab;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let Patrol::Exits(visited) = input.patrol(None) else {
            return Err(EndlessPatrol.into());
        };

        // only obstructions along the original path can change the patrol
        let loop_count = visited
            .into_iter()
            .filter(|&position| position != input.start)
            .filter(|&position| input.patrol(Some(position)) == Patrol::Loops)
            .count();
        Ok(loop_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

    #[test]
    fn parse_requires_one_guard() {
        assert!(Lab::parse("...\n.#.\n").is_err());
        assert!(Lab::parse("^.^\n").is_err());
    }

    #[test]
    fn turn_right_cycles_directions() {
        let up = Vector2::new(0, -1);
        let right = turn_right(up);
        assert_eq!(right, Vector2::new(1, 0));
        assert_eq!(turn_right(turn_right(turn_right(right))), up);
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Lab::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 41);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Lab::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 6);
        Ok(())
    }
}
