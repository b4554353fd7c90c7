use std::collections::{HashMap, HashSet};

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::{Point2, Vector2};

use crate::grid::Grid;

#[solution_runner(
    name = "Day 10: Hoof It",
    parsed = TopographicMap,
    part_one = Day10,
    part_two = Day10
)]
impl super::AdventOfCode2024<10> {}

/*
Input is a topographic map as a grid of heights from 0 (lowest) to 9 (highest).

A hiking trail is any path that starts at height 0, ends at height 9, and always increases height by
exactly 1 at each step. Steps are only up, down, left, or right. A trailhead is any position that
starts one or more trails.
*/

type Height = u8;

const TRAILHEAD: Height = 0;
const SUMMIT: Height = 9;

#[derive(Debug)]
struct TopographicMap(Grid<Height>);

#[derive(thiserror::Error, Debug)]
enum ParseTopographicMapError {
    #[error("height is not a digit: {0:?}")]
    InvalidHeight(char),
}

impl ParseData for TopographicMap {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let grid = Grid::parse_with(input, |_, _, character| {
            character
                .to_digit(10)
                .and_then(|digit| Height::try_from(digit).ok())
                .ok_or(ParseTopographicMapError::InvalidHeight(character))
        })?;
        Ok(Self(grid))
    }
}

impl TopographicMap {
    fn trailheads(&self) -> impl Iterator<Item = Point2<i32>> + '_ {
        self.0
            .iter_points()
            .filter(|&(_, &height)| height == TRAILHEAD)
            .map(|(point, _)| point)
    }

    /// Positions one step up a gentle slope from `point`.
    fn uphill_steps(&self, point: Point2<i32>) -> impl Iterator<Item = Point2<i32>> + '_ {
        let height = self.0.get_point(point).copied();
        [
            Vector2::new(0, -1),
            Vector2::new(1, 0),
            Vector2::new(0, 1),
            Vector2::new(-1, 0),
        ]
        .into_iter()
        .map(move |step| point + step)
        .filter(move |&next| {
            let next_height = self.0.get_point(next).copied();
            matches!((height, next_height), (Some(h), Some(n)) if n == h + 1)
        })
    }
}

/*
For part 1, a trailhead's score is the number of height-9 positions reachable from it by hiking
trails. Sum the scores of all trailheads.
*/

impl TopographicMap {
    fn score(&self, trailhead: Point2<i32>) -> usize {
        let mut reached = HashSet::new();
        let mut summits = HashSet::new();
        let mut stack = vec![trailhead];

        while let Some(point) = stack.pop() {
            if !reached.insert(point) {
                continue;
            }
            if self.0.get_point(point) == Some(&SUMMIT) {
                summits.insert(point);
            }
            stack.extend(self.uphill_steps(point));
        }
        summits.len()
    }
}

struct Day10;

impl Solution<PartOne> for Day10 {
    type Input = TopographicMap;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let total = input
            .trailheads()
            .map(|trailhead| input.score(trailhead))
            .checked_sum()
            .expect("should not have integer overflow during summation");
        Ok(total)
    }
}

/*
For part 2, a trailhead's rating is the number of distinct hiking trails that begin at it. Sum the
ratings of all trailheads.
*/

impl TopographicMap {
    /// Count distinct trails from `point` to any summit, memoizing counts by position.
    fn rating(&self, point: Point2<i32>, memo: &mut HashMap<Point2<i32>, u64>) -> u64 {
        if let Some(&count) = memo.get(&point) {
            return count;
        }

        let count = if self.0.get_point(point) == Some(&SUMMIT) {
            1
        } else {
            let next_points: Vec<_> = self.uphill_steps(point).collect();
            next_points
                .into_iter()
                .map(|next| self.rating(next, memo))
                .checked_sum()
                .expect("should not have integer overflow during summation")
        };
        memo.insert(point, count);
        count
    }
}

impl Solution<PartTwo> for Day10 {
    type Input = TopographicMap;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut memo = HashMap::new();
        let trailheads: Vec<_> = input.trailheads().collect();
        let total = trailheads
            .into_iter()
            .map(|trailhead| input.rating(trailhead, &mut memo))
            .checked_sum()
            .expect("should not have integer overflow during summation");
        Ok(total)
    }
}
