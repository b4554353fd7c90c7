use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::iter;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 9: Disk Fragmenter",
    parsed = Disk,
    part_one = Day09,
    part_two = Day09
)]
impl super::AdventOfCode2024<9> {}

/*
Input is a disk map: a single line of digits alternating between the length of a file and the
length of free space, starting with a file. Files are given IDs in the order they appear, starting
at 0.
*/

type FileId = u64;

/// A contiguous run of disk content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    File { id: FileId, size: u32 },
    Free { size: u32 },
}

impl Block {
    fn size(self) -> u32 {
        match self {
            Self::File { size, .. } | Self::Free { size } => size,
        }
    }

    /// The same kind of block (and file ID) with another size.
    fn with_size(self, size: u32) -> Self {
        match self {
            Self::File { id, .. } => Self::File { id, size },
            Self::Free { .. } => Self::Free { size },
        }
    }

    /// Check the block is a file occupying space.
    fn is_file_content(self) -> bool {
        matches!(self, Self::File { size, .. } if size > 0)
    }

    /// Check the block is free space that can be filled.
    fn is_free_space(self) -> bool {
        matches!(self, Self::Free { size } if size > 0)
    }
}

type NodeIndex = usize;

#[derive(Debug, Clone)]
struct Node {
    block: Block,
    prev: Option<NodeIndex>,
    next: Option<NodeIndex>,
}

/// The blocks of a disk in physical order.
///
/// Blocks live in an arena of nodes linked to their neighbors by index. Node indices stay valid
/// while blocks are split and swapped, so they can be held as cursors.
#[derive(Debug, Clone, Default)]
struct Disk {
    nodes: Vec<Node>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
}

#[derive(thiserror::Error, Debug)]
enum ParseDiskError {
    #[error("invalid digit in disk map at index {index}: {character:?}")]
    InvalidDigit { index: usize, character: char },

    #[error("disk map is empty")]
    Empty,
}

impl ParseData for Disk {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let disk_map = input.trim();
        if disk_map.is_empty() {
            return Err(ParseDiskError::Empty.into());
        }

        let mut disk = Self::default();
        let mut next_id: FileId = 0;
        for (index, character) in disk_map.char_indices() {
            let size = character
                .to_digit(10)
                .ok_or(ParseDiskError::InvalidDigit { index, character })?;

            // even positions are files, odd positions free space
            let block = if index % 2 == 0 {
                let id = next_id;
                next_id += 1;
                Block::File { id, size }
            } else {
                Block::Free { size }
            };
            disk.push_back(block);
        }

        Ok(disk)
    }
}

impl Disk {
    fn push_back(&mut self, block: Block) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node {
            block,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        index
    }

    /// Insert a block directly after the node at `index`.
    fn insert_after(&mut self, index: NodeIndex, block: Block) -> NodeIndex {
        let new_index = self.nodes.len();
        let next = self.nodes[index].next;
        self.nodes.push(Node {
            block,
            prev: Some(index),
            next,
        });

        self.nodes[index].next = Some(new_index);
        match next {
            Some(next) => self.nodes[next].prev = Some(new_index),
            None => self.tail = Some(new_index),
        }
        new_index
    }

    /// Unlink the node at `index` from the disk. The node stays in the arena, unreachable.
    fn unlink(&mut self, index: NodeIndex) {
        let Node { prev, next, .. } = self.nodes[index];
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[index].prev = None;
        self.nodes[index].next = None;
    }

    /// Iterate node indices in physical order.
    fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        iter::successors(self.head, |&index| self.nodes[index].next)
    }

    /// Iterate blocks in physical order.
    fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.node_indices().map(|index| self.nodes[index].block)
    }

    /// Split the block at `index` so it keeps `size` units, moving the remainder into a new block
    /// of the same kind directly after it.
    ///
    /// # Returns
    ///
    /// The index of the new block holding the remainder.
    ///
    /// # Panics
    ///
    /// If `size` is not strictly between 0 and the block's size.
    fn split(&mut self, index: NodeIndex, size: u32) -> NodeIndex {
        let block = self.nodes[index].block;
        assert!(
            size > 0 && size < block.size(),
            "split size {size} must be within block size {} ({block:?})",
            block.size()
        );

        self.nodes[index].block = block.with_size(size);
        self.insert_after(index, block.with_size(block.size() - size))
    }

    /// Exchange the positions of two blocks of equal size.
    ///
    /// The blocks trade nodes, so the node at `a` afterwards holds the block that was at `b` and
    /// vice versa.
    ///
    /// # Panics
    ///
    /// If the blocks differ in size.
    fn swap(&mut self, a: NodeIndex, b: NodeIndex) {
        let block_a = self.nodes[a].block;
        let block_b = self.nodes[b].block;
        assert_eq!(
            block_a.size(),
            block_b.size(),
            "swapped blocks must be equal in size ({block_a:?}, {block_b:?})"
        );

        self.nodes[a].block = block_b;
        self.nodes[b].block = block_a;
    }

    /// Move file content from the node at `source` into free space at the node at `destination`,
    /// splitting whichever block is larger.
    ///
    /// # Returns
    ///
    /// A tuple of the node now holding the moved file content and the node now holding the
    /// vacated free space.
    fn fill_free(&mut self, destination: NodeIndex, source: NodeIndex) -> (NodeIndex, NodeIndex) {
        let free_size = self.nodes[destination].block.size();
        let file_size = self.nodes[source].block.size();

        match free_size.cmp(&file_size) {
            Ordering::Equal => {
                self.swap(destination, source);
                (destination, source)
            }
            Ordering::Greater => {
                // remainder of the free space stays after the moved file
                self.split(destination, file_size);
                self.swap(destination, source);
                (destination, source)
            }
            Ordering::Less => {
                // only the trailing fragment of the file that fits is moved
                let fragment = self.split(source, file_size - free_size);
                self.swap(destination, fragment);
                (destination, fragment)
            }
        }
    }

    /// Compact the disk by moving file content from the end into the leftmost free space, one
    /// block at a time, splitting files across gaps as needed.
    ///
    /// # Returns
    ///
    /// The number of moves made.
    fn compact(&mut self) -> usize {
        let mut moves = 0;
        let mut destination = self.head;
        let mut source = self.tail;

        loop {
            // forward to the next free space, stopping if the cursors meet
            let free = loop {
                let Some(index) = destination else {
                    return moves;
                };
                if self.nodes[index].block.is_free_space() {
                    break index;
                }
                if destination == source {
                    return moves;
                }
                destination = self.nodes[index].next;
            };

            // backward to the last file content, stopping if the cursors meet
            let file = loop {
                let Some(index) = source else {
                    return moves;
                };
                if index == free {
                    return moves;
                }
                if self.nodes[index].block.is_file_content() {
                    break index;
                }
                source = self.nodes[index].prev;
            };

            let (filled, vacated) = self.fill_free(free, file);
            moves += 1;
            tracing::trace!(disk = %self, "moved file content");

            destination = Some(filled);
            source = Some(vacated);
        }
    }

    /// Check that no free space comes before any file content.
    #[cfg(test)]
    fn is_compacted(&self) -> bool {
        let mut seen_free_space = false;
        for block in self.blocks() {
            if block.is_free_space() {
                seen_free_space = true;
            } else if block.is_file_content() && seen_free_space {
                return false;
            }
        }
        true
    }

    /// The total units occupied by files.
    #[cfg(test)]
    fn file_units(&self) -> u64 {
        self.blocks()
            .filter_map(|block| match block {
                Block::File { size, .. } => Some(u64::from(size)),
                Block::Free { .. } => None,
            })
            .sum()
    }
}

/// Accumulate a file's checksum contribution, for `size` units starting at `position`.
fn file_checksum(checksum: u64, id: FileId, position: u64, size: u32) -> u64 {
    (position..position + u64::from(size)).fold(checksum, |sum, unit_position| {
        unit_position
            .checked_mul(id)
            .and_then(|product| sum.checked_add(product))
            .expect("checksum should not overflow")
    })
}

impl Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in self.blocks() {
            for _ in 0..block.size() {
                match block {
                    Block::File { id, .. } => write!(f, "{id}")?,
                    Block::Free { .. } => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

/*
For part 1, move file blocks one at a time from the end of the disk to the leftmost free space until
there are no gaps between file blocks. Return the filesystem checksum: the sum of each block
position multiplied by the file ID in it.
*/

impl Disk {
    /// The checksum of the contiguous file content at the start of the disk.
    ///
    /// Summing stops at the first free space.
    fn checksum(&self) -> u64 {
        let mut checksum = 0;
        let mut position = 0;
        for block in self.blocks() {
            match block {
                Block::File { id, size } => {
                    checksum = file_checksum(checksum, id, position, size);
                    position += u64::from(size);
                }
                Block::Free { size: 0 } => {}
                Block::Free { .. } => break,
            }
        }
        checksum
    }
}

struct Day09;

impl Solution<PartOne> for Day09 {
    type Input = Disk;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut disk = input.clone();
        let moves = disk.compact();
        tracing::debug!(moves, blocks = disk.nodes.len(), "compacted disk");
        Ok(disk.checksum())
    }
}

/*
For part 2, move whole files instead: attempt to move each file exactly once, in order of
decreasing file ID, into the leftmost span of free space to its left that can hold it. Files that
don't fit anywhere stay put.

The checksum now counts free space positions too, as gaps remain between files.
*/

impl Disk {
    /// Compact the disk by moving whole files into the leftmost free space that fits them.
    ///
    /// Expects every file to be in a single block, as parsed.
    ///
    /// # Returns
    ///
    /// The number of files moved.
    fn compact_whole_files(&mut self) -> usize {
        self.merge_free_spans();
        let mut files: Vec<(FileId, NodeIndex)> = self
            .node_indices()
            .filter_map(|index| match self.nodes[index].block {
                Block::File { id, size } if size > 0 => Some((id, index)),
                _ => None,
            })
            .collect();
        files.sort_unstable_by(|a, b| b.0.cmp(&a.0));

        let mut moves = 0;
        for (_, file) in files {
            let file_size = self.nodes[file].block.size();
            // only free space to the left of the file is a candidate
            let target = self
                .node_indices()
                .take_while(|&index| index != file)
                .find(|&index| match self.nodes[index].block {
                    Block::Free { size } => size >= file_size,
                    Block::File { .. } => false,
                });

            if let Some(free) = target {
                self.fill_free(free, file);
                moves += 1;
            }
        }
        tracing::trace!(disk = %self, moves, "moved whole files");
        moves
    }

    /// Merge each physical span of free space into a single block, dropping empty files.
    ///
    /// An empty file occupies no units, so the free space either side of it is contiguous.
    fn merge_free_spans(&mut self) {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let next = self.nodes[index].next;
            match (self.nodes[index].block, next.map(|next| self.nodes[next].block)) {
                (Block::File { size: 0, .. }, _) => {
                    self.unlink(index);
                    cursor = next;
                }
                (Block::Free { .. }, Some(Block::File { size: 0, .. })) => {
                    // stay on this block to absorb what follows the empty file
                    self.unlink(next.expect("next block was matched"));
                }
                (Block::Free { size }, Some(Block::Free { size: next_size })) => {
                    self.nodes[index].block = Block::Free {
                        size: size + next_size,
                    };
                    self.unlink(next.expect("next block was matched"));
                }
                _ => cursor = next,
            }
        }
    }

    /// The checksum of all file content, where free space still occupies positions.
    fn layout_checksum(&self) -> u64 {
        let mut checksum = 0;
        let mut position = 0;
        for block in self.blocks() {
            if let Block::File { id, size } = block {
                checksum = file_checksum(checksum, id, position, size);
            }
            position += u64::from(block.size());
        }
        checksum
    }
}

impl Solution<PartTwo> for Day09 {
    type Input = Disk;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut disk = input.clone();
        let moves = disk.compact_whole_files();
        tracing::debug!(moves, "compacted disk by whole files");
        Ok(disk.layout_checksum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "2333133121414131402\n";

    fn count_blocks(disk: &Disk, predicate: fn(&Block) -> bool) -> usize {
        disk.blocks().filter(predicate).count()
    }

    #[test]
    fn parse_example() -> DynamicResult<()> {
        let disk = Disk::parse(EXAMPLE_INPUT)?;
        assert_eq!(disk.blocks().count(), 19);
        assert_eq!(count_blocks(&disk, |b| matches!(b, Block::File { .. })), 10);
        assert_eq!(count_blocks(&disk, |b| matches!(b, Block::Free { .. })), 9);

        let first_blocks: Vec<_> = disk.blocks().take(3).collect();
        assert_eq!(
            first_blocks,
            [
                Block::File { id: 0, size: 2 },
                Block::Free { size: 3 },
                Block::File { id: 1, size: 3 },
            ]
        );
        assert_eq!(
            disk.to_string(),
            "00...111...2...333.44.5555.6666.777.888899"
        );
        Ok(())
    }

    #[test]
    fn parse_short_maps() -> DynamicResult<()> {
        let disk = Disk::parse("1234")?;
        assert_eq!(count_blocks(&disk, |b| matches!(b, Block::File { .. })), 2);
        assert_eq!(count_blocks(&disk, |b| matches!(b, Block::Free { .. })), 2);
        assert_eq!(disk.to_string(), "0..111....");

        let disk = Disk::parse("12345")?;
        assert_eq!(count_blocks(&disk, |b| matches!(b, Block::File { .. })), 3);
        assert_eq!(count_blocks(&disk, |b| matches!(b, Block::Free { .. })), 2);
        assert_eq!(disk.to_string(), "0..111....22222");
        Ok(())
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert!(Disk::parse("12a4").is_err());
        assert!(Disk::parse("").is_err());
    }

    #[test]
    fn split_keeps_total_size() -> DynamicResult<()> {
        let mut disk = Disk::parse("1234")?;
        let free = disk.node_indices().nth(1).expect("second block exists");
        let remainder = disk.split(free, 1);

        assert_eq!(disk.blocks().count(), 5);
        assert_eq!(disk.nodes[free].next, Some(remainder));
        assert_eq!(disk.nodes[free].block, Block::Free { size: 1 });
        assert_eq!(disk.nodes[remainder].block, Block::Free { size: 1 });

        let file = disk.node_indices().nth(3).expect("file block exists");
        let fragment = disk.split(file, 2);
        assert_eq!(disk.nodes[file].block, Block::File { id: 1, size: 2 });
        assert_eq!(disk.nodes[fragment].block, Block::File { id: 1, size: 1 });
        assert_eq!(disk.to_string(), "0..111....");
        Ok(())
    }

    #[test]
    #[should_panic(expected = "split size")]
    fn split_by_whole_size_panics() {
        let mut disk = Disk::parse("1234").expect("valid disk map");
        let free = disk.node_indices().nth(1).expect("second block exists");
        disk.split(free, 2);
    }

    #[test]
    fn swap_exchanges_positions() -> DynamicResult<()> {
        let mut disk = Disk::parse("131")?;
        let first = disk.head.expect("disk has a head");
        let last = disk.tail.expect("disk has a tail");
        disk.swap(first, last);
        assert_eq!(disk.to_string(), "1...0");
        Ok(())
    }

    #[test]
    #[should_panic(expected = "equal in size")]
    fn swap_mismatched_sizes_panics() {
        let mut disk = Disk::parse("1234").expect("valid disk map");
        let first = disk.head.expect("disk has a head");
        let last = disk.tail.expect("disk has a tail");
        disk.swap(first, last);
    }

    #[test]
    fn compact_short_maps() -> DynamicResult<()> {
        let mut disk = Disk::parse("12345")?;
        disk.compact();
        assert_eq!(disk.to_string(), "022111222......");
        assert!(disk.is_compacted());
        assert_eq!(disk.checksum(), 60);

        let mut disk = Disk::parse("1234")?;
        disk.compact();
        assert_eq!(disk.to_string(), "0111......");
        assert!(disk.is_compacted());
        Ok(())
    }

    #[test]
    fn compact_example() -> DynamicResult<()> {
        let mut disk = Disk::parse(EXAMPLE_INPUT)?;
        assert!(!disk.is_compacted());
        disk.compact();
        assert_eq!(
            disk.to_string(),
            "0099811188827773336446555566.............."
        );
        assert!(disk.is_compacted());
        assert_eq!(disk.checksum(), 1928);
        Ok(())
    }

    #[test]
    fn compact_preserves_file_units() -> DynamicResult<()> {
        let disk = Disk::parse(EXAMPLE_INPUT)?;
        let mut compacted = disk.clone();
        compacted.compact();
        assert_eq!(compacted.file_units(), disk.file_units());
        assert_eq!(compacted.file_units(), 28);
        Ok(())
    }

    #[test]
    fn compact_is_idempotent() -> DynamicResult<()> {
        let mut disk = Disk::parse(EXAMPLE_INPUT)?;
        assert!(disk.compact() > 0);
        let layout = disk.to_string();
        assert_eq!(disk.compact(), 0);
        assert_eq!(disk.to_string(), layout);
        Ok(())
    }

    #[test]
    fn empty_gaps_need_no_moves() -> DynamicResult<()> {
        let mut disk = Disk::parse("10101")?;
        assert!(disk.is_compacted());
        assert_eq!(disk.compact(), 0);
        assert_eq!(disk.checksum(), 1 + 2 * 2);
        Ok(())
    }

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Disk::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 1928);
        Ok(())
    }

    #[test]
    fn whole_file_compaction_of_example() -> DynamicResult<()> {
        let mut disk = Disk::parse(EXAMPLE_INPUT)?;
        disk.compact_whole_files();
        assert_eq!(
            disk.to_string(),
            "00992111777.44.333....5555.6666.....8888.."
        );
        Ok(())
    }

    #[test]
    fn whole_file_fits_around_empty_file() -> DynamicResult<()> {
        // file 1 is empty, so the free space either side of it is one span of 7
        let mut disk = Disk::parse("3606117")?;
        assert_eq!(disk.compact_whole_files(), 1);
        assert_eq!(disk.to_string(), "00033333332........");
        assert_eq!(disk.layout_checksum(), 146);
        assert_eq!(disk.file_units(), 11);
        Ok(())
    }

    #[test]
    fn merge_free_spans_drops_empty_files() -> DynamicResult<()> {
        let mut disk = Disk::parse("1203046")?;
        let layout = disk.to_string();
        disk.merge_free_spans();
        assert_eq!(disk.to_string(), layout);
        assert_eq!(
            disk.blocks().collect::<Vec<_>>(),
            [
                Block::File { id: 0, size: 1 },
                Block::Free { size: 9 },
                Block::File { id: 3, size: 6 },
            ]
        );
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Disk::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2858);
        Ok(())
    }
}
