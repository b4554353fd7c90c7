use std::collections::HashSet;

use aoc_framework::parsing::{InputScanner, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

#[solution_runner(
    name = "Day 5: Print Queue",
    parsed = PrintQueue,
    part_one = Day05,
    part_two = Day05
)]
impl super::AdventOfCode2024<5> {}

/*
Input has two blocks separated by an empty line.

The first block is page ordering rules, one per line, formatted `X|Y`: if an update includes both
pages `X` and `Y`, page `X` must be printed before page `Y`.

The second block is updates, one per line, as a comma-separated list of page numbers to print.
*/

type Page = u32;

#[derive(Debug)]
struct PrintQueue {
    /// Ordering rules as pairs of (earlier, later) pages.
    rules: HashSet<(Page, Page)>,
    updates: Vec<Vec<Page>>,
}

#[derive(thiserror::Error, Debug)]
enum ParsePrintQueueError {
    #[error("expected rule formatted as `X|Y`, found: {0:?}")]
    ExpectedRuleFormat(String),

    #[error("update has no pages")]
    EmptyUpdate,
}

impl ParseData for PrintQueue {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);

        scanner.skip_empty();
        let rules = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
            let (earlier, later) = line
                .split_once('|')
                .ok_or_else(|| ParsePrintQueueError::ExpectedRuleFormat(line.to_owned()))?;
            Ok((
                parse_with_context::<Page>(earlier)?,
                parse_with_context::<Page>(later)?,
            ))
        })?;

        scanner.skip_empty();
        let updates = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
            let pages = line
                .split(',')
                .map(parse_with_context::<Page>)
                .collect::<Result<Vec<_>, _>>()?;
            if pages.is_empty() {
                return Err(ParsePrintQueueError::EmptyUpdate.into());
            }
            Ok(pages)
        })?;

        Ok(Self {
            rules: rules.into_iter().collect(),
            updates,
        })
    }
}

impl PrintQueue {
    /// Check no rule is broken by a page printed after another it should precede.
    fn is_ordered(&self, update: &[Page]) -> bool {
        update.iter().enumerate().all(|(index, &earlier)| {
            update[index + 1..]
                .iter()
                .all(|&later| !self.rules.contains(&(later, earlier)))
        })
    }
}

fn middle_page(update: &[Page]) -> Page {
    update[update.len() / 2]
}

/*
For part 1, find the updates already in the right order and add up their middle page numbers.
*/

struct Day05;

impl Solution<PartOne> for Day05 {
    type Input = PrintQueue;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let sum = input
            .updates
            .iter()
            .filter(|update| input.is_ordered(update))
            .map(|update| middle_page(update))
            .checked_sum()
            .expect("should not have integer overflow during summation");
        Ok(sum)
    }
}

/*
For part 2, put each incorrectly-ordered update in the right order using the rules, then add up
the middle page numbers of only those updates.
*/

/// An update's applicable rules contain a cycle, so no order satisfies them.
#[derive(thiserror::Error, Debug)]
#[error("ordering rules form a cycle through page {0}")]
struct CyclicRules(Page);

impl PrintQueue {
    /// Order the pages of an update by the rules that apply between them.
    fn reorder(&self, update: &[Page]) -> Result<Vec<Page>, CyclicRules> {
        let mut graph: DiGraphMap<Page, ()> = DiGraphMap::new();
        for &page in update {
            graph.add_node(page);
        }
        for &(earlier, later) in &self.rules {
            if graph.contains_node(earlier) && graph.contains_node(later) {
                graph.add_edge(earlier, later, ());
            }
        }

        toposort(&graph, None).map_err(|cycle| CyclicRules(cycle.node_id()))
    }
}

impl Solution<PartTwo> for Day05 {
    type Input = PrintQueue;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let reordered = input
            .updates
            .iter()
            .filter(|update| !input.is_ordered(update))
            .map(|update| input.reorder(update))
            .collect::<Result<Vec<_>, _>>()?;

        let sum = reordered
            .iter()
            .map(|update| middle_page(update))
            .checked_sum()
            .expect("should not have integer overflow during summation");
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"47|53
97|13
97|61
97|47
75|29
61|13
75|53
29|13
97|29
53|29
61|53
97|53
61|29
47|13
75|47
97|75
47|61
75|61
47|29
75|13
53|13

75,47,61,53,29
97,61,53,29,13
75,29,13
75,97,47,61,53
61,13,29
97,13,75,29,47
";

    #[test]
    fn reorder_follows_rules() -> DynamicResult<()> {
        let parsed = PrintQueue::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.reorder(&[75, 97, 47, 61, 53])?, [97, 75, 47, 61, 53]);
        assert_eq!(parsed.reorder(&[97, 13, 75, 29, 47])?, [97, 75, 47, 29, 13]);
        Ok(())
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = PrintQueue::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 143);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = PrintQueue::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 123);
        Ok(())
    }
}
