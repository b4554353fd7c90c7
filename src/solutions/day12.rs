use std::collections::HashSet;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::{Point2, Vector2};

use crate::disjoint_sets::{DisjointSets, Label, UNASSIGNED};
use crate::grid::Grid;

#[solution_runner(
    name = "Day 12: Garden Groups",
    parsed = Garden,
    part_one = Day12,
    part_two = Day12
)]
impl super::AdventOfCode2024<12> {}

/*
Input is a map of garden plots formatted as a character grid. Each character is the type of plant
growing in that plot. Plots of the same plant that touch horizontally or vertically form a region.
*/

/// A garden plot in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Plot {
    /// The plant growing in the plot.
    plant: char,
    /// The region label of the plot, [`UNASSIGNED`] before labeling.
    label: Label,
    row: usize,
    col: usize,
}

impl Plot {
    /// The position of the plot, where `x` is the column and `y` the row.
    fn point(self) -> Point2<i64> {
        let x = i64::try_from(self.col).expect("plot column should fit i64");
        let y = i64::try_from(self.row).expect("plot row should fit i64");
        Point2::new(x, y)
    }
}

#[derive(thiserror::Error, Debug)]
enum ParsePlotError {
    #[error("invalid plant character: {0:?}")]
    InvalidPlant(char),
}

fn parse_plots(input: &str) -> DynamicResult<Grid<Plot>> {
    Grid::parse_with(input, |row, col, plant| {
        if plant.is_ascii_graphic() {
            Ok(Plot {
                plant,
                label: UNASSIGNED,
                row,
                col,
            })
        } else {
            Err(ParsePlotError::InvalidPlant(plant))
        }
    })
}

/// Label every plot so that plots in the same region share a label.
///
/// Plots are visited in row-major order, and each is merged with its left and upper neighbors when
/// they grow the same plant. Labels are then resolved to the representative of their merged set.
fn label_regions(grid: &mut Grid<Plot>) {
    let mut sets = DisjointSets::default();

    for (row, col) in grid.positions() {
        if grid[(row, col)].label == UNASSIGNED {
            grid[(row, col)].label = sets.make_set();
        }
        let Plot { plant, label, .. } = grid[(row, col)];

        if col > 0 && grid[(row, col - 1)].plant == plant {
            sets.union(label, grid[(row, col - 1)].label);
        }
        if row > 0 && grid[(row - 1, col)].plant == plant {
            sets.union(label, grid[(row - 1, col)].label);
        }
    }

    for (row, col) in grid.positions() {
        let plot = &mut grid[(row, col)];
        plot.label = sets.find(plot.label);
    }
    tracing::trace!(labels = sets.len(), "labeled plots");
}

/// A connected group of plots growing the same plant.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Region {
    /// The member plots, never empty.
    plots: Vec<Plot>,
}

/// Partition a labeled grid into its regions.
fn into_regions(grid: Grid<Plot>) -> Vec<Region> {
    let mut plots = grid.into_row_major();
    plots.sort_by_key(|plot| plot.label);

    plots
        .chunk_by(|a, b| a.label == b.label)
        .map(|run| Region {
            plots: run.to_vec(),
        })
        .collect()
}

/// The four orthogonal unit steps.
fn orthogonal_steps() -> [Vector2<i64>; 4] {
    [
        Vector2::new(0, -1),
        Vector2::new(1, 0),
        Vector2::new(0, 1),
        Vector2::new(-1, 0),
    ]
}

/// Which side of a grid line the region lies on, for a unit of that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    /// Not a boundary of the region.
    None,
    /// The region is before the line (above, or left of, it).
    Before,
    /// The region is after the line (below, or right of, it).
    After,
}

impl Edge {
    fn classify(before: bool, after: bool) -> Self {
        match (before, after) {
            (true, false) => Self::Before,
            (false, true) => Self::After,
            _ => Self::None,
        }
    }
}

/// Count sides along a sequence of parallel grid lines.
///
/// `edge_at(line, unit)` classifies one unit of a line. A side starts wherever a unit is a boundary
/// and differs from the unit before it on the same line.
fn count_line_sides(
    lines: impl Iterator<Item = i64>,
    units: impl Iterator<Item = i64> + Clone,
    edge_at: impl Fn(i64, i64) -> Edge,
) -> u64 {
    let mut sides = 0;
    for line in lines {
        let mut previous = Edge::None;
        for unit in units.clone() {
            let edge = edge_at(line, unit);
            if edge != Edge::None && edge != previous {
                sides += 1;
            }
            previous = edge;
        }
    }
    sides
}

impl Region {
    /// The plant growing throughout the region.
    #[cfg(test)]
    fn plant(&self) -> char {
        self.plots[0].plant
    }

    fn area(&self) -> u64 {
        u64::try_from(self.plots.len()).expect("region area should fit u64")
    }

    fn points(&self) -> HashSet<Point2<i64>> {
        self.plots.iter().map(|plot| plot.point()).collect()
    }

    /// The count of plot edges that don't neighbor another plot of the region.
    fn perimeter(&self) -> u64 {
        let points = self.points();
        let exposed_edges = points
            .iter()
            .flat_map(|point| orthogonal_steps().map(|step| point + step))
            .filter(|neighbor| !points.contains(neighbor))
            .count();
        u64::try_from(exposed_edges).expect("region perimeter should fit u64")
    }

    /// The count of straight sections of fence around the region, including around holes.
    ///
    /// Sweeps horizontal grid lines across columns, then vertical grid lines across rows. Edges
    /// are told apart by which side the region lies on, so regions touching only at a corner
    /// don't join their sides.
    fn sides(&self) -> u64 {
        let points = self.points();
        let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = points.iter().map(|p| p.x).max().unwrap_or(-1);
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(-1);
        let contains = |x: i64, y: i64| points.contains(&Point2::new(x, y));

        // the line at `y` runs along the top of row `y`
        let horizontal = count_line_sides(min_y..=max_y + 1, min_x..=max_x, |y, x| {
            Edge::classify(contains(x, y - 1), contains(x, y))
        });
        // the line at `x` runs along the left of column `x`
        let vertical = count_line_sides(min_x..=max_x + 1, min_y..=max_y, |x, y| {
            Edge::classify(contains(x - 1, y), contains(x, y))
        });

        horizontal + vertical
    }
}

/// How fencing is priced for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pricing {
    /// Area multiplied by perimeter.
    Standard,
    /// Area multiplied by number of sides.
    BulkDiscount,
}

impl Region {
    fn price(&self, pricing: Pricing) -> u64 {
        let fencing = match pricing {
            Pricing::Standard => self.perimeter(),
            Pricing::BulkDiscount => self.sides(),
        };
        self.area()
            .checked_mul(fencing)
            .expect("region price should not overflow")
    }
}

/// The garden map, partitioned into regions.
#[derive(Debug)]
struct Garden {
    regions: Vec<Region>,
}

impl ParseData for Garden {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut grid = parse_plots(input)?;
        label_regions(&mut grid);
        let regions = into_regions(grid);
        tracing::debug!(regions = regions.len(), "partitioned garden");
        Ok(Self { regions })
    }
}

impl Garden {
    fn total_price(&self, pricing: Pricing) -> u64 {
        self.regions
            .iter()
            .map(|region| region.price(pricing))
            .checked_sum()
            .expect("should not have integer overflow during summation")
    }
}

/*
For part 1, the price of fence for a region is its area multiplied by its perimeter. Find the total
price of fencing every region.
*/

struct Day12;

impl Solution<PartOne> for Day12 {
    type Input = Garden;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.total_price(Pricing::Standard))
    }
}

/*
For part 2, a bulk discount prices a region by its number of sides instead of its perimeter. Each
straight section of fence counts as one side, no matter how long.
*/

impl Solution<PartTwo> for Day12 {
    type Input = Garden;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.total_price(Pricing::BulkDiscount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"AAAA
BBCD
BBCC
EEEC
";

    const ENCLOSED_EXAMPLE_INPUT: &str = r"OOOOO
OXOXO
OOOOO
OXOXO
OOOOO
";

    const LARGER_EXAMPLE_INPUT: &str = r"RRRRIICCFF
RRRRIICCCF
VVRRRCCFFF
VVRCCCJFFF
VVVVCJJCFE
VVIVCCJJEE
VVIIICJJEE
MIIIIIJJEE
MIIISIJEEE
MMMISSJEEE
";

    const E_SHAPED_INPUT: &str = r"EEEEE
EXXXX
EEEEE
EXXXX
EEEEE
";

    const PINCHED_INPUT: &str = r"AAAAAA
AAABBA
AAABBA
ABBAAA
ABBAAA
AAAAAA
";

    /// Count outline corners plot by plot: convex where both orthogonal neighbors toward a
    /// diagonal are outside, concave where both are inside but the diagonal is outside.
    fn count_corners(region: &Region) -> u64 {
        let points = region.points();
        let mut corners = 0;
        for point in &points {
            for (dx, dy) in [(-1, -1), (1, -1), (-1, 1), (1, 1)] {
                let horizontal = points.contains(&(point + Vector2::new(dx, 0)));
                let vertical = points.contains(&(point + Vector2::new(0, dy)));
                let diagonal = points.contains(&(point + Vector2::new(dx, dy)));
                if (!horizontal && !vertical) || (horizontal && vertical && !diagonal) {
                    corners += 1;
                }
            }
        }
        corners
    }

    fn all_examples() -> [&'static str; 5] {
        [
            EXAMPLE_INPUT,
            ENCLOSED_EXAMPLE_INPUT,
            LARGER_EXAMPLE_INPUT,
            E_SHAPED_INPUT,
            PINCHED_INPUT,
        ]
    }

    #[test]
    fn parse_plots_keeps_positions() -> DynamicResult<()> {
        let grid = parse_plots(EXAMPLE_INPUT)?;
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 4);
        assert_eq!(
            grid[(0, 0)],
            Plot {
                plant: 'A',
                label: UNASSIGNED,
                row: 0,
                col: 0
            }
        );
        assert_eq!(grid[(2, 3)].plant, 'C');
        Ok(())
    }

    #[test]
    fn parse_rejects_ragged_or_empty_maps() {
        assert!(Garden::parse("AAA\nAA\n").is_err());
        assert!(Garden::parse("").is_err());
    }

    #[test]
    fn regions_of_examples() -> DynamicResult<()> {
        assert_eq!(Garden::parse(EXAMPLE_INPUT)?.regions.len(), 5);
        assert_eq!(Garden::parse(ENCLOSED_EXAMPLE_INPUT)?.regions.len(), 5);
        assert_eq!(Garden::parse(LARGER_EXAMPLE_INPUT)?.regions.len(), 11);
        Ok(())
    }

    #[test]
    fn regions_share_one_plant() -> DynamicResult<()> {
        let garden = Garden::parse(LARGER_EXAMPLE_INPUT)?;
        for region in &garden.regions {
            let plant = region.plant();
            assert!(region.plots.iter().all(|plot| plot.plant == plant));
        }
        Ok(())
    }

    #[test]
    fn diagonal_plots_are_separate_regions() -> DynamicResult<()> {
        let garden = Garden::parse("AB\nBA\n")?;
        assert_eq!(garden.regions.len(), 4);
        Ok(())
    }

    #[test]
    fn region_areas_cover_grid() -> DynamicResult<()> {
        for input in all_examples() {
            let cells = parse_plots(input)?.len();
            let garden = Garden::parse(input)?;
            let area: u64 = garden.regions.iter().map(Region::area).sum();
            assert_eq!(area, u64::try_from(cells)?);
        }
        Ok(())
    }

    #[test]
    fn partition_is_stable() -> DynamicResult<()> {
        let mut grid = parse_plots(LARGER_EXAMPLE_INPUT)?;
        label_regions(&mut grid);
        let first = into_regions(grid.clone());
        let second = into_regions(grid);
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn single_plot_region() -> DynamicResult<()> {
        let garden = Garden::parse("Z\n")?;
        let region = &garden.regions[0];
        assert_eq!(region.area(), 1);
        assert_eq!(region.perimeter(), 4);
        assert_eq!(region.sides(), 4);
        Ok(())
    }

    #[test]
    fn region_measures_of_example() -> DynamicResult<()> {
        let garden = Garden::parse(EXAMPLE_INPUT)?;
        let mut measures: Vec<_> = garden
            .regions
            .iter()
            .map(|region| (region.plant(), region.area(), region.perimeter(), region.sides()))
            .collect();
        measures.sort_unstable();
        assert_eq!(
            measures,
            [
                ('A', 4, 10, 4),
                ('B', 4, 8, 4),
                ('C', 4, 10, 8),
                ('D', 1, 4, 4),
                ('E', 3, 8, 4),
            ]
        );
        Ok(())
    }

    #[test]
    fn sides_match_corner_count() -> DynamicResult<()> {
        for input in all_examples() {
            for region in Garden::parse(input)?.regions {
                assert_eq!(region.sides(), count_corners(&region), "{region:?}");
            }
        }
        Ok(())
    }

    #[test]
    fn sides_of_plus_and_pinched_shapes() -> DynamicResult<()> {
        let garden = Garden::parse(".A.\nAAA\n.A.\n")?;
        let plus = garden
            .regions
            .iter()
            .find(|region| region.plant() == 'A')
            .ok_or("missing plus region")?;
        assert_eq!(plus.sides(), 12);
        assert_eq!(plus.perimeter(), 12);

        // two plots of B touch only at a corner inside the A region
        let garden = Garden::parse(PINCHED_INPUT)?;
        let outer = garden
            .regions
            .iter()
            .find(|region| region.plant() == 'A')
            .ok_or("missing outer region")?;
        assert_eq!(outer.area(), 28);
        assert_eq!(outer.sides(), 12);
        Ok(())
    }

    #[test]
    fn sides_within_perimeter() -> DynamicResult<()> {
        for input in all_examples() {
            for region in Garden::parse(input)?.regions {
                assert!(region.sides() <= region.perimeter());
            }
        }
        Ok(())
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Garden::parse(EXAMPLE_INPUT)?;
        let result = <Day12 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 140);
        Ok(())
    }

    #[test]
    fn part_one_solves_other_examples() -> DynamicResult<()> {
        let parsed = Garden::parse(ENCLOSED_EXAMPLE_INPUT)?;
        let result = <Day12 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 772);

        let parsed = Garden::parse(LARGER_EXAMPLE_INPUT)?;
        let result = <Day12 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 1930);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Garden::parse(EXAMPLE_INPUT)?;
        let result = <Day12 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 80);
        Ok(())
    }

    #[test]
    fn part_two_solves_other_examples() -> DynamicResult<()> {
        let expected = [
            (ENCLOSED_EXAMPLE_INPUT, 436),
            (LARGER_EXAMPLE_INPUT, 1206),
            (E_SHAPED_INPUT, 236),
            (PINCHED_INPUT, 368),
        ];
        for (input, price) in expected {
            let parsed = Garden::parse(input)?;
            let result = <Day12 as Solution<PartTwo>>::solve(&parsed)?;
            assert_eq!(result, price);
        }
        Ok(())
    }
}
