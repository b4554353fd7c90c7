use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicError, DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::{Point2, Vector2};

use crate::grid::Grid;

#[solution_runner(
    name = "Day 4: Ceres Search",
    parsed = WordSearch,
    part_one = Day04,
    part_two = Day04
)]
impl super::AdventOfCode2024<4> {}

/*
Input is a word search puzzle formatted as a grid of letters.
*/

#[derive(Debug)]
struct WordSearch(Grid<char>);

impl ParseData for WordSearch {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let grid = Grid::parse_with(input, |_, _, letter| Ok::<_, DynamicError>(letter))?;
        Ok(Self(grid))
    }
}

impl WordSearch {
    /// Check a word is spelled from `start`, stepping by `step` between letters.
    fn spells(&self, word: &str, start: Point2<i32>, step: Vector2<i32>) -> bool {
        let mut point = start;
        for letter in word.chars() {
            if self.0.get_point(point) != Some(&letter) {
                return false;
            }
            point += step;
        }
        true
    }
}

/*
For part 1, count every occurrence of `XMAS`. Words may be horizontal, vertical, diagonal, written
backwards, or overlap other words.
*/

/// The eight directions a word can be read in.
fn all_directions() -> impl Iterator<Item = Vector2<i32>> {
    (-1..=1)
        .flat_map(|dy| (-1..=1).map(move |dx| Vector2::new(dx, dy)))
        .filter(|step| *step != Vector2::zeros())
}

struct Day04;

impl Solution<PartOne> for Day04 {
    type Input = WordSearch;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let count = input
            .0
            .iter_points()
            .filter(|&(_, &letter)| letter == 'X')
            .map(|(point, _)| {
                all_directions()
                    .filter(|&step| input.spells("XMAS", point, step))
                    .count()
            })
            .sum();
        Ok(count)
    }
}

/*
For part 2, the puzzle is actually to find two `MAS` in the shape of an X, crossing at the `A`.
Each `MAS` may be written forwards or backwards. Count the X-MAS occurrences.
*/

impl WordSearch {
    /// Check `MAS` is spelled in either direction along the diagonal through `center` with `step`.
    fn crosses_mas(&self, center: Point2<i32>, step: Vector2<i32>) -> bool {
        self.spells("MAS", center - step, step) || self.spells("MAS", center + step, -step)
    }
}

impl Solution<PartTwo> for Day04 {
    type Input = WordSearch;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let count = input
            .0
            .iter_points()
            .filter(|&(point, &letter)| {
                letter == 'A'
                    && input.crosses_mas(point, Vector2::new(1, 1))
                    && input.crosses_mas(point, Vector2::new(1, -1))
            })
            .count();
        Ok(count)
    }
}
