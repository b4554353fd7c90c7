//! A rectangular grid of cells parsed from character input.
//!
//! Cells are built by a caller-supplied constructor receiving the row, column, and character of
//! each position, so each puzzle decides what a cell holds.

use std::ops::{Index, IndexMut};

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::{DynamicError, DynamicResult};
use nalgebra::{DMatrix, Point2, Scalar};

/// A rectangular grid of cells, indexed by `(row, column)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: Scalar> {
    cells: DMatrix<T>,
}

/// An error parsing input into a [`Grid`].
#[derive(thiserror::Error, Debug)]
pub enum ParseGridError {
    #[error("grid input has no cells")]
    Empty,

    #[error("expected grid width to be {expected} across rows, but found row width {found}")]
    UnequalGridWidth { expected: usize, found: usize },
}

impl<T: Scalar> Grid<T> {
    /// Parse a grid from lines of characters, building each cell with `make_cell`.
    ///
    /// `make_cell` is passed the row index, column index, and character of a position. Trailing
    /// whitespace after the last row is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseGridError`] if the input has no cells or rows differ in width, and
    /// propagates any error from `make_cell`, with the failing line attached.
    pub fn parse_with<E, F>(input: &str, mut make_cell: F) -> DynamicResult<Self>
    where
        E: Into<DynamicError>,
        F: FnMut(usize, usize, char) -> Result<T, E>,
    {
        let mut expected_width = None;
        let rows = parse_input_lines(input.trim_end(), |row, line| -> DynamicResult<_> {
            let cells = line
                .chars()
                .enumerate()
                .map(|(col, character)| make_cell(row, col, character).map_err(Into::into))
                .collect::<DynamicResult<Vec<_>>>()?;

            if let Some(width) = expected_width {
                if cells.len() != width {
                    return Err(ParseGridError::UnequalGridWidth {
                        expected: width,
                        found: cells.len(),
                    }
                    .into());
                }
            } else {
                expected_width = Some(cells.len());
            }

            Ok(cells)
        })
        .collect::<Result<Vec<_>, _>>()?;

        let cols = expected_width.unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(ParseGridError::Empty.into());
        }

        let cells = DMatrix::from_row_iterator(rows.len(), cols, rows.into_iter().flatten());
        Ok(Self { cells })
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// The number of cells.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Get the cell at a row and column, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.cells.get((row, col))
    }

    /// Get the cell at a point, where `x` is the column and `y` the row.
    pub fn get_point(&self, point: Point2<i32>) -> Option<&T> {
        let row = usize::try_from(point.y).ok()?;
        let col = usize::try_from(point.x).ok()?;
        self.get(row, col)
    }

    /// Check a point (`x` column, `y` row) is in the bounds of the grid.
    pub fn contains_point(&self, point: Point2<i32>) -> bool {
        self.get_point(point).is_some()
    }

    /// Iterate positions as `(row, column)` in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    /// Iterate cells with their points (`x` column, `y` row) in row-major order.
    ///
    /// # Panics
    ///
    /// If a dimension of the grid does not fit an `i32`.
    pub fn iter_points(&self) -> impl Iterator<Item = (Point2<i32>, &T)> {
        self.positions().map(|(row, col)| {
            let x = i32::try_from(col).expect("grid width should fit i32");
            let y = i32::try_from(row).expect("grid height should fit i32");
            (Point2::new(x, y), &self.cells[(row, col)])
        })
    }

    /// Consume the grid into its cells in row-major order.
    pub fn into_row_major(self) -> Vec<T> {
        self.cells.transpose().iter().cloned().collect()
    }
}

impl<T: Scalar> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.cells[index]
    }
}
