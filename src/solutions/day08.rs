use std::collections::{HashMap, HashSet};

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::{Point2, Vector2};

use crate::grid::Grid;

#[solution_runner(
    name = "Day 8: Resonant Collinearity",
    parsed = AntennaMap,
    part_one = Day08,
    part_two = Day08
)]
impl super::AdventOfCode2024<8> {}

/*
Input is a map of antennas as a character grid. `.` is empty, and any letter or digit is an antenna
tuned to the frequency of that character.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Antenna(char),
}

#[derive(Debug)]
struct AntennaMap {
    cells: Grid<Cell>,
    /// Antenna positions grouped by frequency.
    antennas: HashMap<char, Vec<Point2<i32>>>,
}

#[derive(thiserror::Error, Debug)]
enum ParseAntennaMapError {
    #[error("invalid character in antenna map: {0:?}")]
    InvalidChar(char),
}

impl ParseData for AntennaMap {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let cells = Grid::parse_with(input, |_, _, character| match character {
            '.' => Ok(Cell::Empty),
            c if c.is_ascii_alphanumeric() => Ok(Cell::Antenna(c)),
            _ => Err(ParseAntennaMapError::InvalidChar(character)),
        })?;

        let mut antennas: HashMap<char, Vec<Point2<i32>>> = HashMap::new();
        for (point, cell) in cells.iter_points() {
            if let Cell::Antenna(frequency) = *cell {
                antennas.entry(frequency).or_default().push(point);
            }
        }

        Ok(Self { cells, antennas })
    }
}

impl AntennaMap {
    /// Iterate every ordered pair of distinct antennas sharing a frequency.
    fn antenna_pairs(&self) -> impl Iterator<Item = (Point2<i32>, Point2<i32>)> + '_ {
        self.antennas.values().flat_map(|positions| {
            positions.iter().flat_map(move |&a| {
                positions
                    .iter()
                    .filter(move |&&b| b != a)
                    .map(move |&b| (a, b))
            })
        })
    }

    /// Walk from `start` by `step` while inside the map.
    fn points_in_line(
        &self,
        start: Point2<i32>,
        step: Vector2<i32>,
    ) -> impl Iterator<Item = Point2<i32>> + '_ {
        std::iter::successors(Some(start), move |&point| Some(point + step))
            .take_while(|&point| self.cells.contains_point(point))
    }
}

/*
For part 1, an antinode occurs at any point in line with two antennas of the same frequency where
one antenna is twice as far away as the other. So each pair of antennas has two antinodes, one on
either side. Count the unique positions within the map that contain an antinode.
*/

struct Day08;

impl Solution<PartOne> for Day08 {
    type Input = AntennaMap;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        // each ordered pair yields the antinode beyond its first antenna
        let antinodes: HashSet<_> = input
            .antenna_pairs()
            .map(|(a, b)| a + (a - b))
            .filter(|&point| input.cells.contains_point(point))
            .collect();
        Ok(antinodes.len())
    }
}

/*
For part 2, resonant harmonics mean an antinode occurs at any grid position exactly in line with at
least two antennas of the same frequency, regardless of distance. This includes the antennas'
own positions.
*/

impl Solution<PartTwo> for Day08 {
    type Input = AntennaMap;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let antinodes: HashSet<_> = input
            .antenna_pairs()
            .flat_map(|(a, b)| input.points_in_line(a, a - b))
            .collect();
        Ok(antinodes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"............
........0...
.....0......
.......0....
....0.......
......A.....
............
............
........A...
.........A..
............
............
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = AntennaMap::parse(EXAMPLE_INPUT)?;
        let result = <Day08 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 14);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = AntennaMap::parse(EXAMPLE_INPUT)?;
        let result = <Day08 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 34);
        Ok(())
    }

    #[test]
    fn part_two_counts_single_line_harmonics() -> DynamicResult<()> {
        let parsed = AntennaMap::parse("T....\n..T..\n....T\n.....\n")?;
        let result = <Day08 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 3);
        Ok(())
    }
}
